//! Cartesian product of commands and flags
//!
//! Commands vary slowest: every flag is tried against the first command
//! before moving to the next. Nothing is filtered or deduplicated, so a
//! command listed twice is exercised twice.

/// Call `f` once per (command, flag) pair, commands outer, flags inner
pub fn run_all_combinations<C, F, Func>(commands: &[C], flags: &[F], mut f: Func)
where
    C: AsRef<str>,
    F: AsRef<str>,
    Func: FnMut(&str, &str),
{
    for command in commands {
        for flag in flags {
            f(command.as_ref(), flag.as_ref());
        }
    }
}

/// Same order as [`run_all_combinations`], as an iterator
pub fn combinations<'a, C, F>(
    commands: &'a [C],
    flags: &'a [F],
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a
where
    C: AsRef<str>,
    F: AsRef<str>,
{
    commands.iter().flat_map(move |command| {
        flags
            .iter()
            .map(move |flag| (command.as_ref(), flag.as_ref()))
    })
}

/// Fallible variant used by the exerciser: stops at the first `Err`
pub fn try_run_all_combinations<C, F, E, Func>(
    commands: &[C],
    flags: &[F],
    mut f: Func,
) -> Result<(), E>
where
    C: AsRef<str>,
    F: AsRef<str>,
    Func: FnMut(&str, &str) -> Result<(), E>,
{
    for (command, flag) in combinations(commands, flags) {
        f(command, flag)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_commands_outer_flags_inner() {
        let mut calls = Vec::new();
        run_all_combinations(&["a", "b"], &["-x", "-y"], |c, f| {
            calls.push((c.to_string(), f.to_string()))
        });

        assert_eq!(
            calls,
            vec![
                ("a".to_string(), "-x".to_string()),
                ("a".to_string(), "-y".to_string()),
                ("b".to_string(), "-x".to_string()),
                ("b".to_string(), "-y".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_not_collapsed() {
        let mut count = 0;
        run_all_combinations(&["same", "same"], &["", ""], |_, _| count += 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_empty_side_yields_nothing() {
        let none: [&str; 0] = [];
        let mut count = 0;
        run_all_combinations(&none, &["-x"], |_, _| count += 1);
        run_all_combinations(&["a"], &none, |_, _| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_iterator_matches_callback_order() {
        let commands = vec!["run".to_string(), "jobs list".to_string()];
        let flags = vec!["-C".to_string(), "-c admin.config".to_string()];

        let mut via_callback = Vec::new();
        run_all_combinations(&commands, &flags, |c, f| {
            via_callback.push(format!("{c}|{f}"))
        });
        let via_iter: Vec<_> = combinations(&commands, &flags)
            .map(|(c, f)| format!("{c}|{f}"))
            .collect();

        assert_eq!(via_callback, via_iter);
    }

    #[test]
    fn test_try_run_stops_at_first_error() {
        let mut seen = Vec::new();
        let result: Result<(), String> =
            try_run_all_combinations(&["a", "b"], &["-x", "-y"], |c, f| {
                seen.push(format!("{c}{f}"));
                if c == "a" && f == "-y" {
                    Err("boom".to_string())
                } else {
                    Ok(())
                }
            });

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(seen, vec!["a-x", "a-y"]);
    }
}
