//! `urlsift extract` – print the feature vector of one URL.

use anyhow::Result;
use urlsift_core::features::extract;

pub fn run_extract(url: &str, json: bool) -> Result<()> {
    let features = extract(url);
    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        println!("{:<28} {}", "FEATURE", "VALUE");
        for (name, value) in features.iter() {
            println!("{:<28} {}", name, value);
        }
    }
    Ok(())
}
