//=========================================================================
// Global Engine State
//=========================================================================
//
// Separates systems (logic) from context (shared per-tick data).
//
// Architecture:
//   GlobalSystems: StateStack + SessionResources (owned by orchestrator)
//   GlobalContext: StateTracker + MessageBus + CommandQueue (lent to states)
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_systems;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_systems::GlobalSystems;
