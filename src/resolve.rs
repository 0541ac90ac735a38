//! Core resolution pipeline: apply every channel to the settings in turn and
//! check that required settings were supplied.
//!
//! Process state is never read here. Arguments, environment lookup, and the
//! external file loader all arrive through [`ResolveInput`], which makes the
//! whole pipeline testable with synthetic inputs. Steps:
//!
//! 1. Inject the environment prefix into every parameter
//! 2. Parse command line flags and apply them
//! 3. Look up declared environment variables and apply them
//! 4. Load every external file named by a file-reference setting and apply
//!    it, ignoring keys no setting declares
//! 5. Fail on the first setting that nothing supplied
//!
//! A value is only replaced by input from a strictly higher-ranked channel,
//! so the order of steps 2 to 4 does not change which input wins.

use tracing::debug;

use crate::env;
use crate::error::{ErrorKind, RankfigError};
use crate::flags;
use crate::options::Options;
use crate::setting::Settings;
use crate::source::Source;

/// Looks up one environment variable by full name.
pub type EnvLookup<'i> = &'i dyn Fn(&str) -> Option<String>;

/// Fetches and decodes one external file.
pub type Loader<'i> = &'i dyn Fn(&str) -> Result<Options, RankfigError>;

/// Everything the pipeline reads from the outside world.
pub struct ResolveInput<'i> {
    /// Command line arguments, program name excluded.
    pub args: Vec<String>,
    /// Environment namespace. Empty means unprefixed names.
    pub prefix: &'i str,
    /// Pass [`env::process_var`] or a synthetic lookup.
    pub env: EnvLookup<'i>,
    /// Pass [`file::load`](crate::file::load) or a synthetic loader.
    pub load: Loader<'i>,
}

/// Resolve `settings` from `input`.
///
/// 1. Set each parameter's stub to the prefix
/// 2. `flags` → map (any unknown flag is fatal)
/// 3. `environment` → map
/// 4. For each external path: load → map, skipping unexpected keys
/// 5. Required settings still at [`Source::None`] → `MissingRequiredOption`
pub fn resolve(settings: &mut Settings<'_, '_>, input: ResolveInput<'_>) -> Result<(), RankfigError> {
    // 1: Stubs
    for setting in settings.iter_mut() {
        setting.parameters.set_stub(input.prefix);
    }

    // 2: Command line
    let options = flags::flags(input.args)?;
    debug!(options = options.len(), "applying command line");
    settings.map(&options, &[])?;

    // 3: Environment
    let options = env::environment(input.prefix, settings, input.env);
    debug!(options = options.len(), "applying environment");
    settings.map(&options, &[])?;

    // 4: External files
    for uri in settings.external() {
        let options = (input.load)(&uri)?;
        debug!(uri = %uri, options = options.len(), "applying external config");
        settings.map(&options, &[ErrorKind::UnexpectedArgument])?;
    }

    // 5: Required
    if let Some(missing) = settings.iter().find(|s| s.value.source == Source::None) {
        return Err(RankfigError::MissingRequiredOption {
            parameters: missing.parameters.clone(),
        });
    }

    Ok(())
}
