//! Command line shared by both binaries: `<program> <command> [args...]`.

use crate::UsageError;

/// Splits the process arguments into the child's argv, i.e. everything after the program name.
///
/// Fails with a [`UsageError`] naming the program if no command was given.
pub fn command_from_args(args: impl IntoIterator<Item = String>) -> Result<Vec<String>, UsageError> {
    let mut args = args.into_iter();
    let program = args.next().unwrap_or_else(|| "chooseprio".to_owned());
    let argv: Vec<String> = args.collect();
    if argv.is_empty() {
        return Err(UsageError { program });
    }
    Ok(argv)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::command_from_args;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn command_and_args() {
        let argv = command_from_args(args(&["prog", "sleep", "1"])).unwrap();
        assert_eq!(argv, args(&["sleep", "1"]));
    }

    #[test]
    fn missing_command() {
        let err = command_from_args(args(&["prog"])).unwrap_err();
        assert_eq!(err.to_string(), "Usage: prog <command> [args...]");
    }

    #[test]
    fn no_args_at_all() {
        assert!(command_from_args(Vec::new()).is_err());
    }
}
