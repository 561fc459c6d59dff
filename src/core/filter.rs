//! Per-script argument filtering
//!
//! Reduces a shared command line to the tokens one script understands.
//! Positional arguments are shared by every script; flags are kept only when
//! the script declares them.
//!
//! Flag arity is not modelled: a bare flag is assumed to take the following
//! token as its value whenever that token does not look like a flag. An
//! unsupported boolean flag therefore also drops a positional that directly
//! follows it (`-x file.txt` loses `file.txt`).

/// Character that marks a token as a flag
pub const FLAG_PREFIX: char = '-';

/// Whether a token looks like a flag rather than a positional or value
pub fn looks_like_flag(token: &str) -> bool {
    token.starts_with(FLAG_PREFIX)
}

/// Filter `args` down to positionals plus the flags accepted by `supports`
///
/// Relative order is preserved. `--flag=value` tokens are kept or dropped
/// whole. A bare flag carries the following non-flag token along with it.
pub fn filter_args<S, F>(args: &[S], supports: F) -> Vec<String>
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let mut filtered = Vec::with_capacity(args.len());
    let mut i = 0;

    while i < args.len() {
        let arg: &str = args[i].as_ref();

        if !looks_like_flag(arg) {
            filtered.push(arg.to_string());
            i += 1;
            continue;
        }

        if let Some((flag, _)) = arg.split_once('=') {
            if supports(flag) {
                filtered.push(arg.to_string());
            }
            i += 1;
            continue;
        }

        let value: Option<&str> = args
            .get(i + 1)
            .map(|next| next.as_ref())
            .filter(|next| !looks_like_flag(next));

        if supports(arg) {
            filtered.push(arg.to_string());
            if let Some(value) = value {
                filtered.push(value.to_string());
            }
        }

        i += if value.is_some() { 2 } else { 1 };
    }

    filtered
}
