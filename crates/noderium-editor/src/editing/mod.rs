/*!
 * # Editing Core
 *
 * The buffer, its syntax tree and the selection the decoration passes read.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The entire document is stored in a single **`xi_rope::Rope`** buffer
 * - **Lossless round-trip**: saving writes rope bytes verbatim with no formatting drift
 *
 * ### 2. Command-Based Editing
 * - All edits are represented as **Commands** (`Cmd` enum) that compile to **Deltas**
 * - Each applied command bumps the document version and re-parses the tree
 *
 * ### 3. Transactions
 * - Views never edit the document directly; they dispatch a **`Transaction`**
 *   holding an optional `Change` and an optional `Selection`
 * - Without an explicit selection the current one is mapped through the change
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with line addressing over the rope
 * - **`commands`**: `Cmd` enum and delta compilation
 * - **`patch`**: what an applied command changed
 * - **`selection`**: `Selection` and `Change` with position mapping
 * - **`state`**: `EditorState` and `Transaction`
 */

pub mod commands;
pub mod document;
pub mod patch;
pub mod selection;
pub mod state;

pub use commands::Cmd;
pub use document::{Document, Line};
pub use patch::Patch;
pub use selection::{Change, Selection};
pub use state::{EditorState, Transaction};
