//! Native stand-ins for the external fs/stream/system primitives a
//! scripting host would expose to an embedded script. There is no script
//! VM here: this module is the sandbox of primitives a future embedder
//! would wire a scripting language to, and the crate's own CLI binary is
//! itself one such embedder, minus the scripting language.

pub mod fs;
pub mod stream;
pub mod system;
