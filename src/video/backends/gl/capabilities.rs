use gl::types::*;
use std::cmp;
use std::ffi;

use crate::errors::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Profile {
    Core,
    Compatibility,
}

/// A `GL_VERSION` reduced to its API and `major.minor`. Desktop and ES versions are
/// not comparable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl Version {
    /// Queries the version of the context current in this thread.
    pub unsafe fn query() -> Result<Version> {
        Version::parse(&parse_str(gl::VERSION)?)
    }

    /// Parses a `GL_VERSION` string such as `3.3.0 NVIDIA 390.77` or `OpenGL ES 3.0 Mesa`.
    pub fn parse(desc: &str) -> Result<Version> {
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-CM ") {
            (true, &desc[13..])
        } else {
            (false, desc)
        };

        let desc = desc
            .split(' ')
            .next()
            .ok_or_else(|| format_err!("[GL] Version string is unformaled."))?;

        let mut iter = desc.split('.');
        let mut component = || -> Result<u8> {
            iter.next()
                .and_then(|v| v.parse().ok())
                .ok_or_else(|| format_err!("[GL] Version string `{}` is unformaled.", desc))
        };

        let major = component()?;
        let minor = component()?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

/// What the context reported once at startup.
#[derive(Debug)]
pub struct Capabilities {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,
    /// `None` before 3.2, where the profile mask does not exist.
    pub profile: Option<Profile>,
    /// Texture units are `GL_TEXTURE0` up to this value, exclusive.
    pub max_combined_texture_image_units: u32,
}

impl Capabilities {
    pub unsafe fn parse() -> Result<Capabilities> {
        let version = Version::query()?;

        Ok(Capabilities {
            version,
            vendor: parse_str(gl::VENDOR)?,
            renderer: parse_str(gl::RENDERER)?,
            profile: Capabilities::parse_profile(version),
            max_combined_texture_image_units: Capabilities::parse_texture_image_units(),
        })
    }

    /// Fails with `Error::Requirement` unless this context runs at least the core
    /// profile of `major.minor`.
    pub fn require(&self, major: u8, minor: u8) -> Result<()> {
        if !(self.version >= Version::GL(major, minor)) {
            return Err(Error::Requirement(format!(
                "OpenGL {}.{} (found {:?})",
                major, minor, self.version
            ))
            .into());
        }

        if self.profile == Some(Profile::Compatibility) {
            warn!("[GL] running in a compatibility profile.");
        }

        Ok(())
    }

    #[inline]
    unsafe fn parse_profile(version: Version) -> Option<Profile> {
        if version >= Version::GL(3, 2) {
            let mut val = 0;
            gl::GetIntegerv(gl::CONTEXT_PROFILE_MASK, &mut val);
            let val = val as GLenum;
            if (val & gl::CONTEXT_COMPATIBILITY_PROFILE_BIT) != 0 {
                Some(Profile::Compatibility)
            } else if (val & gl::CONTEXT_CORE_PROFILE_BIT) != 0 {
                Some(Profile::Core)
            } else {
                None
            }
        } else {
            None
        }
    }

    #[inline]
    unsafe fn parse_texture_image_units() -> u32 {
        let mut val = 2;
        gl::GetIntegerv(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut val);
        val as u32
    }
}

#[inline]
unsafe fn parse_str(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        bail!("[GL] String of {} is null.", id);
    }

    String::from_utf8(ffi::CStr::from_ptr(s as *const _).to_bytes().to_vec())
        .map_err(|_| format_err!("[GL] String of {} is unformaled.", id))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(
            Version::parse("3.3.0 NVIDIA 390.77").unwrap(),
            Version::GL(3, 3)
        );
        assert_eq!(
            Version::parse("4.6 (Core Profile) Mesa 20.0.8").unwrap(),
            Version::GL(4, 6)
        );
        assert_eq!(
            Version::parse("OpenGL ES 3.0 Mesa").unwrap(),
            Version::ES(3, 0)
        );
        assert!(Version::parse("garbage").is_err());
    }

    #[test]
    fn ordering() {
        assert!(Version::GL(4, 1) >= Version::GL(3, 3));
        assert!(Version::GL(3, 2) < Version::GL(3, 3));
        assert!(!(Version::ES(3, 0) >= Version::GL(3, 0)));
        assert!(!(Version::GL(3, 0) >= Version::ES(3, 0)));
    }
}
