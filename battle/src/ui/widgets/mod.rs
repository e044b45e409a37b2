//! TUI widgets for the battle screen

pub mod combat_log;
pub mod initiative;
pub mod monster_panel;
pub mod party_panel;

pub use combat_log::CombatLogWidget;
pub use initiative::InitiativeWidget;
pub use monster_panel::MonsterPanelWidget;
pub use party_panel::PartyPanelWidget;
