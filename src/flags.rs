//! Command line argument grammar.
//!
//! `--name` is a long flag and `-n` a short flag. A flag takes the following
//! token as its value unless that token is missing or itself starts with `-`,
//! in which case the value is `"true"`. Any other token is an error.

use crate::error::RankfigError;
use crate::options::Options;
use crate::parameter::{Parameter, Parameters};
use crate::source::{Source, Sources};

const DASH: char = '-';
const LONG: &str = "--";

/// Collect flag/value pairs from `args` (program name already stripped).
pub fn flags<I, S>(args: I) -> Result<Options, RankfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = Options::new();
    let mut args = args.into_iter().map(Into::into).peekable();

    while let Some(token) = args.next() {
        let source = if token.starts_with(LONG) {
            Source::Flag
        } else if token.starts_with(DASH) {
            Source::ShortFlag
        } else {
            return Err(RankfigError::UnexpectedArgument {
                parameters: Parameters::from(vec![Parameter::accepting(
                    token,
                    Sources::COMMAND_LINE,
                )]),
            });
        };
        let parameter = Parameter::new(token.trim_start_matches(DASH), source);

        let value = match args.next_if(|next| !next.starts_with(DASH)) {
            Some(value) => value,
            None => "true".to_string(),
        };
        options.insert(parameter, value);
    }

    Ok(options)
}
