use colored::Colorize;
use serde_json::Value;

pub fn json(value: &Value) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_does_not_panic() {
        json(&serde_json::json!({"status_code": 204})).unwrap();
    }

    #[test]
    fn test_info_does_not_panic() {
        info("This is info");
    }
}
