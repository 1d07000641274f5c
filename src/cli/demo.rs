//! Sample-data seeding for a quick look around

use anyhow::Result;
use chrono::{Duration, Utc};

use advoca::feed::Post;
use advoca::game::{
    BadgeId, NotifPermission, ProgressRecord, ReminderFrequency, ReminderSettings, DAY_MS,
};
use advoca::store::StateKey;
use advoca::symptoms::SymptomEntry;

use super::AppContext;

pub fn demo_command(ctx: &AppContext) -> Result<()> {
    let now = Utc::now();
    let now_ms = now.timestamp_millis();

    let posts = sample_posts(now_ms);
    let symptoms = sample_symptoms(now);
    let progress = sample_progress(now_ms);

    ctx.store.save(StateKey::Posts, &posts)?;
    ctx.store.save(StateKey::Symptoms, &symptoms)?;
    ctx.store.save(StateKey::Progress, &progress)?;

    println!("Demo mode activated with sample data!");
    Ok(())
}

fn sample_posts(now_ms: i64) -> Vec<Post> {
    let post = |hours_ago: i64, text: &str, topic: &str, location: &str, author: &str| Post {
        id: format!("demo-p{hours_ago}"),
        text: text.to_string(),
        topic: topic.to_string(),
        location: location.to_string(),
        ts: now_ms - hours_ago * 3_600_000,
        author: Some(author.to_string()),
        user_id: None,
    };

    vec![
        post(
            1,
            "Finally got my cardiologist to take my chest pain seriously after showing him 3 months of symptom logs. The data made all the difference! 💪",
            "Cardio",
            "Beirut",
            "Maya K.",
        ),
        post(
            2,
            "The practice scenarios really helped me rehearse assertive responses. Used them today when the doctor tried to dismiss my symptoms as anxiety. Got the tests I needed!",
            "Advocacy",
            "Tripoli",
            "Lina H.",
        ),
        post(
            3,
            "Does anyone else experience heart palpitations that get worse at night? My doctor says it's stress but I've been tracking patterns and it seems hormonal.",
            "Cardio",
            "Saida",
            "Rania M.",
        ),
        post(
            4,
            "Support group meeting tomorrow at AUB Medical Center, 6 PM. Topic: Navigating insurance claims for specialized care. All welcome! 🤝",
            "Support",
            "Beirut",
            "Nour T.",
        ),
        post(
            5,
            "After months of being told my fatigue was 'normal', finally got diagnosed with an autoimmune condition. Never give up advocating for yourself!",
            "Diagnosis",
            "Jbeil",
            "Sarah A.",
        ),
        post(
            6,
            "New research paper published on gender bias in cardiovascular diagnosis. Sharing the link in comments. We need systemic change! 📊",
            "Research",
            "Beirut",
            "Dr. Zeina K.",
        ),
    ]
}

fn sample_symptoms(now: chrono::DateTime<Utc>) -> Vec<SymptomEntry> {
    let entry = |days_ago: i64,
                 name: &str,
                 severity: u8,
                 hr: u32,
                 sys: u32,
                 dia: u32,
                 notes: &str| {
        SymptomEntry::new(
            (now - Duration::days(days_ago)).date_naive(),
            name.to_string(),
            severity,
            Some(hr),
            Some(sys),
            Some(dia),
            notes.to_string(),
        )
    };

    vec![
        entry(
            0,
            "Shortness of breath",
            6,
            98,
            135,
            88,
            "Difficulty breathing during light activity. Had to stop walking up stairs.",
        ),
        entry(
            1,
            "Chest pain",
            7,
            95,
            130,
            85,
            "Sharp pain on left side, lasted 20 minutes. Happened during rest, not exertion.",
        ),
        entry(
            2,
            "Heart palpitations",
            6,
            110,
            125,
            80,
            "Irregular heartbeat, felt like skipping. Occurred after coffee.",
        ),
        entry(
            3,
            "Fatigue",
            8,
            72,
            115,
            75,
            "Extreme exhaustion despite 9 hours sleep. Unable to complete daily activities.",
        ),
        entry(
            4,
            "Dizziness",
            5,
            88,
            110,
            70,
            "Light-headed when standing up quickly. Improved after hydration.",
        ),
    ]
}

fn sample_progress(now_ms: i64) -> ProgressRecord {
    ProgressRecord {
        score: 12,
        xp: 450,
        level: 5,
        streak: 7,
        last_play_date: Some(now_ms),
        played: ["s1", "s2", "s3", "s4", "s5"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        badges: vec![
            BadgeId::FirstSteps,
            BadgeId::GettingStronger,
            BadgeId::Unstoppable,
            BadgeId::Warrior,
            BadgeId::Dedicated,
        ],
        reminders: ReminderSettings {
            freq: ReminderFrequency::Daily,
            next_at: now_ms + DAY_MS,
            notifs: NotifPermission::Granted,
        },
        perfect_streak: 3,
        days_played: 7,
    }
}
