//! Assembly identity as it appears in assembly-qualified type names.
//!
//! # ECMA-335 References
//!
//! - **Section II.6.1**: Overview of assemblies - defines assembly identity components
//! - **Section II.6.2.1**: Assembly versioning - four-part version number semantics
//! - **Section II.6.2.1.3**: Public key and token - strong name identity format
//! - **Section II.22.5**: AssemblyRef table - assembly reference structure
//!
//! # Key Components
//!
//! - [`AssemblyIdentity`] - Name, version, culture and public key token of an assembly
//! - [`AssemblyVersion`] - Four-part version numbering (major.minor.build.revision)
//!
//! # Display Names
//!
//! The qualifier appended to every assembly-qualified type name is the assembly's display
//! name restricted to exactly four components, always in this order:
//!
//! ```text
//! Name, Version=Major.Minor.Build.Revision, Culture=<culture|neutral>, PublicKeyToken=<hex|null>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use typeident::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let mscorlib = AssemblyIdentity::parse(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//! )?;
//! assert_eq!(mscorlib.version, AssemblyVersion::new(4, 0, 0, 0));
//! assert_eq!(
//!     mscorlib.display_name(),
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
//! );
//! # Ok::<(), typeident::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are immutable values and implement [`Send`] and [`Sync`].
//! Identities can be used as keys in concurrent collections like `DashMap`.

use std::{fmt, str::FromStr};

use crate::{
    metadata::identity::{Identity, PublicKeyToken},
    Error, Result,
};

/// Identity information for a .NET assembly.
///
/// Identifies an assembly by simple name, version, culture and public key token. Strong
/// names given as full public keys are reduced to their token on construction, so two
/// identities are equal exactly when their display names are equal.
///
/// # Examples
///
/// ```rust
/// use typeident::metadata::identity::{AssemblyIdentity, AssemblyVersion};
///
/// let identity = AssemblyIdentity::new(
///     "MyLibrary",
///     AssemblyVersion::new(1, 2, 3, 4),
///     Some("en-US".to_string()),
///     None,
/// );
/// assert_eq!(
///     identity.display_name(),
///     "MyLibrary, Version=1.2.3.4, Culture=en-US, PublicKeyToken=null"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core").
    pub name: String,

    /// Four-part version number. [`AssemblyVersion::UNKNOWN`] when the source carried none.
    pub version: AssemblyVersion,

    /// Culture information for localized assemblies.
    ///
    /// `None` indicates a culture-neutral assembly. An empty string or `neutral` passed to
    /// the constructors is normalized to `None`.
    pub culture: Option<String>,

    /// Public key token of a strong-named assembly.
    pub public_key_token: Option<PublicKeyToken>,
}

/// Four-part version numbering for .NET assemblies.
///
/// Versions are compared component-wise in order: major, minor, build, revision.
///
/// # Examples
///
/// ```rust
/// use typeident::metadata::identity::AssemblyVersion;
///
/// let version = AssemblyVersion::new(1, 2, 3, 4);
/// assert_eq!(version.to_string(), "1.2.3.4");
///
/// let parsed = AssemblyVersion::parse("2.0")?;
/// assert!(parsed > version);
/// # Ok::<(), typeident::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component.
    pub major: u16,
    /// Minor version component.
    pub minor: u16,
    /// Build version component.
    pub build: u16,
    /// Revision version component.
    pub revision: u16,
}

impl AssemblyIdentity {
    /// Create a new assembly identity with the specified components.
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name for identification
    /// * `version` - Four-part version number
    /// * `culture` - Optional culture for localized assemblies
    /// * `strong_name` - Optional public key or token
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        strong_name: Option<Identity>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            culture: culture.filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("neutral")),
            public_key_token: strong_name.map(|identity| identity.to_token()),
        }
    }

    /// Create an identity carrying only a simple name.
    ///
    /// Useful for references whose version and strong name are supplied later by an
    /// [`crate::project::AssemblyResolver`].
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, AssemblyVersion::UNKNOWN, None, None)
    }

    /// Create an identity from the raw columns of an `AssemblyRef` metadata row.
    ///
    /// Version components are stored as `u16` in metadata; wider values saturate.
    ///
    /// # Arguments
    ///
    /// * `name` - The `Name` column
    /// * `version` - Major, minor, build and revision numbers
    /// * `culture` - The `Culture` column (empty for neutral)
    /// * `public_key_or_token` - The `PublicKeyOrToken` blob
    /// * `has_public_key` - Whether the `PublicKey` flag (0x0001) was set
    ///
    /// # Errors
    /// Returns an error if a token blob is shorter than 8 bytes.
    pub fn from_assembly_ref(
        name: &str,
        version: (u32, u32, u32, u32),
        culture: &str,
        public_key_or_token: &[u8],
        has_public_key: bool,
    ) -> Result<Self> {
        let strong_name = if public_key_or_token.is_empty() {
            None
        } else {
            Some(Identity::from(public_key_or_token, has_public_key)?)
        };

        Ok(Self::new(
            name,
            Self::version_from_u32(version.0, version.1, version.2, version.3),
            Some(culture.to_string()),
            strong_name,
        ))
    }

    #[inline]
    fn version_from_u32(major: u32, minor: u32, build: u32, revision: u32) -> AssemblyVersion {
        AssemblyVersion::new(
            u16::try_from(major).unwrap_or(u16::MAX),
            u16::try_from(minor).unwrap_or(u16::MAX),
            u16::try_from(build).unwrap_or(u16::MAX),
            u16::try_from(revision).unwrap_or(u16::MAX),
        )
    }

    /// Parse assembly identity from display name string.
    ///
    /// # Format
    ///
    /// ```text
    /// AssemblyName[, Version=Major.Minor.Build.Revision][, Culture=culture][, PublicKeyToken=token]
    /// ```
    ///
    /// Components with other keys (`ProcessorArchitecture`, `Retargetable`, ...) are accepted
    /// and ignored; they never appear in assembly-qualified type names.
    ///
    /// # Errors
    /// Returns an error if the name is empty, a component lacks `=`, or a version or token
    /// value cannot be parsed.
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(malformed_error!("Assembly name cannot be empty"));
        }

        let mut version = AssemblyVersion::UNKNOWN;
        let mut culture = None;
        let mut public_key_token = None;

        for part in parts {
            let Some((key, value)) = part.split_once('=') else {
                return Err(malformed_error!(
                    "Invalid assembly name component '{}' in '{}'",
                    part,
                    display_name
                ));
            };

            let value = value.trim();
            match key.trim() {
                "Version" => version = AssemblyVersion::parse(value)?,
                "Culture" => culture = Some(value.to_string()),
                "PublicKeyToken" => {
                    if value != "null" && !value.is_empty() {
                        public_key_token = Some(PublicKeyToken::parse(value)?);
                    }
                }
                _ => {}
            }
        }

        let mut identity = Self::new(name, version, culture, None);
        identity.public_key_token = public_key_token;
        Ok(identity)
    }

    /// Generate the display name used as the assembly qualifier of type names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typeident::metadata::identity::{AssemblyIdentity, AssemblyVersion};
    ///
    /// let identity = AssemblyIdentity::new("MyLibrary", AssemblyVersion::new(1, 0, 0, 0), None, None);
    /// assert_eq!(
    ///     identity.display_name(),
    ///     "MyLibrary, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null"
    /// );
    /// ```
    #[must_use]
    pub fn display_name(&self) -> String {
        self.to_string()
    }

    /// Get the simple assembly name without version or culture information.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Check if this assembly is strong-named.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.public_key_token.is_some()
    }

    /// Check if this assembly is culture-neutral.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }

    /// Check if this assembly identity satisfies a dependency requirement.
    ///
    /// # Matching Rules
    ///
    /// 1. **Name**: Must match case-insensitively
    /// 2. **Culture**: Must match exactly
    /// 3. **Version**: Must be compatible per [`AssemblyVersion::is_compatible_with`]
    /// 4. **Token**: Must match when the requirement names one
    #[must_use]
    pub fn satisfies(&self, required: &AssemblyIdentity) -> bool {
        if !self.name.eq_ignore_ascii_case(&required.name) {
            return false;
        }

        if self.culture != required.culture {
            return false;
        }

        if required.public_key_token.is_some() && self.public_key_token != required.public_key_token
        {
            return false;
        }

        self.version.is_compatible_with(&required.version)
    }
}

impl AssemblyVersion {
    /// Sentinel value (0.0.0.0) representing an unknown or unspecified version.
    pub const UNKNOWN: Self = Self {
        major: 0,
        minor: 0,
        build: 0,
        revision: 0,
    };

    /// Create a new assembly version with the specified components.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Check if this version represents an unknown/unspecified version.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.build == 0 && self.revision == 0
    }

    /// Check if this version is compatible with a required version.
    ///
    /// - If the required version is unknown (0.0.0.0), any version is compatible
    /// - Otherwise, the major versions must match and this version must be >= required
    #[must_use]
    pub fn is_compatible_with(&self, required: &AssemblyVersion) -> bool {
        if required.is_unknown() {
            return true;
        }

        self.major == required.major && *self >= *required
    }

    /// Parse assembly version from string representation.
    ///
    /// Accepts one to four dot-separated components; missing components default to 0.
    ///
    /// # Errors
    /// Returns an error if the version string has an invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u16; 4];

        for (i, part) in parts.iter().enumerate() {
            components[i] = part
                .parse::<u16>()
                .map_err(|_| malformed_error!("Invalid version component: {}", part))?;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Version={}, Culture={}, PublicKeyToken=",
            self.name,
            self.version,
            self.culture.as_deref().unwrap_or("neutral")
        )?;

        match &self.public_key_token {
            Some(token) => write!(f, "{token}"),
            None => f.write_str("null"),
        }
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
