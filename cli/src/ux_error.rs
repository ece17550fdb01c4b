use colored::Colorize;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>,
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None,
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn unknown_action(name: &str, valid: &[String]) -> UxError {
    UxError::new(format!("Unknown action: '{}'", name))
        .why(format!("Valid actions are: {}", valid.join(", ")))
        .fix("Use one of the listed action names")
        .fix("Omit --action to run the maintenance routine")
        .suggest("graphctl --action subscribed_list")
}

pub fn invalid_credentials(details: &str) -> UxError {
    UxError::new("Missing or invalid credentials")
        .why(details.to_string())
        .fix("Export tenant_id, client_id, client_secret and username")
        .fix("Or pass --tenant-id, --client-id, --client-secret and --username")
        .suggest("graphctl --tenant-id <id> --client-id <id> --client-secret <secret> --username <upn>")
}

pub fn config_error(message: &str) -> UxError {
    UxError::new(format!("Configuration error: {}", message))
        .why("An environment variable holds a value that could not be parsed")
        .fix("Check the GRAPH_* and GRAPHCTL_* environment variables")
}
