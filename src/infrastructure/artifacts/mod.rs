//! Artifact infrastructure - filesystem scanning and registry verification

mod scanner;

pub use scanner::{Artifact, ArtifactScanner, ArtifactSet, VerifyReport};
