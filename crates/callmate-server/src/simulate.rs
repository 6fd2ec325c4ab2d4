//! Scripted call replay against a running backend

use serde_json::{json, Value};

/// Customer lines replayed by `callmate simulate`, in order
pub const SCRIPT: &[&str] = &[
    "Hi, this is Rajat Shinde calling about my order.",
    "I have been waiting two weeks and it is still not here.",
    "I am not happy, my card number is 4111 1111 1111 1111 and I want a refund.",
    "You can reach me at rajat@example.com or 9876543210.",
    "Okay, thank you for sorting that out.",
];

/// Post every scripted line to `/suggest`, then fetch `/summary/:call_id`
pub async fn run(target: &str, call_id: &str) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let base = target.trim_end_matches('/');

    println!("Simulating call {} against {}", call_id, base);
    println!();

    for (turn, line) in SCRIPT.iter().enumerate() {
        let response = client
            .post(format!("{}/suggest", base))
            .json(&json!({ "text": line, "call_id": call_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("suggest failed with {}: {}", response.status(), response.text().await?);
        }

        let result: Value = response.json().await?;
        println!("  [{}] customer: {}", turn + 1, line);
        println!("      redacted:   {}", field(&result, "redacted_text"));
        println!("      suggestion: {}", field(&result, "suggestion"));
        println!(
            "      sentiment={} compliance={} escalation={} ({} ms)",
            field(&result, "sentiment"),
            field(&result, "compliance"),
            field(&result, "escalation"),
            result["latency_ms"],
        );
        println!();
    }

    let summary: Value = client
        .get(format!("{}/summary/{}", base, call_id))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Post-call report");
    println!("  {}", field(&summary, "summary"));
    println!(
        "  sentiment={} compliance={} escalation={}",
        field(&summary, "sentiment_overall"),
        field(&summary, "compliance_overall"),
        field(&summary, "escalation"),
    );

    Ok(())
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or("-")
}
