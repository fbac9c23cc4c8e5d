//! Version string parsing and bump arithmetic on top of the `semver` crate.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};

/// Longest version string accepted, in bytes.
pub const MAX_VERSION_LENGTH: usize = 128;

/// Kind of bump applied by the bump operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
    /// Drop pre-release and build metadata.
    Release,
    /// Promote a pre-release, otherwise bump patch.
    Auto,
}

impl BumpKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Release => "release",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "release" => Ok(Self::Release),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown bump kind {other:?} (expected patch, minor, major, release or auto)"
            )),
        }
    }
}

/// Parse a version string as found in a version file.
///
/// Surrounding whitespace and a single leading `v` are ignored.
pub fn parse_version(input: &str) -> Result<Version, String> {
    let trimmed = input.trim();
    if trimmed.len() > MAX_VERSION_LENGTH {
        return Err(format!(
            "version string exceeds maximum length of {MAX_VERSION_LENGTH}"
        ));
    }
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|e| e.to_string())
}

/// Apply a bump, resetting lower components and clearing pre-release and build.
///
/// Fails when the incremented component would overflow.
pub fn bump(current: &Version, kind: BumpKind) -> Result<Version, String> {
    let (major, minor, patch) = (current.major, current.minor, current.patch);
    let next = match kind {
        BumpKind::Patch => Version::new(major, minor, increment(patch, "patch")?),
        BumpKind::Minor => Version::new(major, increment(minor, "minor")?, 0),
        BumpKind::Major => Version::new(increment(major, "major")?, 0, 0),
        BumpKind::Release => Version::new(major, minor, patch),
        BumpKind::Auto => {
            if !current.pre.is_empty() {
                Version::new(major, minor, patch)
            } else if major == 0 && minor == 9 && patch == 0 {
                Version::new(0, 10, 0)
            } else {
                Version::new(major, minor, increment(patch, "patch")?)
            }
        }
    };
    Ok(next)
}

fn increment(component: u64, label: &str) -> Result<u64, String> {
    component
        .checked_add(1)
        .ok_or_else(|| format!("{label} component {component} cannot be incremented"))
}

pub fn with_prerelease(mut version: Version, label: &str) -> Result<Version, String> {
    version.pre = Prerelease::new(label).map_err(|e| format!("invalid pre-release {label:?}: {e}"))?;
    Ok(version)
}

pub fn with_build(mut version: Version, build: &str) -> Result<Version, String> {
    version.build =
        BuildMetadata::new(build).map_err(|e| format!("invalid build metadata {build:?}: {e}"))?;
    Ok(version)
}
