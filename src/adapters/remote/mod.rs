//! SSH / SCP access to remote hosts

pub mod openssh;
pub mod traits;

pub use openssh::{expand_home, OpenSshShell};
pub use traits::{CommandOutput, RemoteShell};
