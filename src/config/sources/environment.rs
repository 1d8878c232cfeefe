//! Environment source: GRAFT_<SECTION>__<KEY>, e.g. GRAFT_STORE__ROOT_DOCUMENT

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("GRAFT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
