pub mod archive;
pub mod system;
pub mod tasting;

use crate::cli::registry::{CommandGroup, CommandRegistry};

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register_group(CommandGroup::Tasting, tasting::definitions());
    registry.register_group(CommandGroup::Archive, archive::definitions());
    registry.register_group(CommandGroup::Session, system::definitions());
}
