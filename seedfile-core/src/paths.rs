use std::path::{Path, PathBuf};

use crate::error::MaterializeError;

/// Expand a leading `~` or `~user`.
///
/// `~` and `~/...` use `home`, which is only consulted when expansion is
/// actually needed. `~user/...` uses that user's home directory; an unknown
/// user leaves the path as-is. Paths without a leading tilde are untouched.
pub fn expand_home(path: &str, home: Option<&Path>) -> Result<PathBuf, MaterializeError> {
    expand_home_with(path, home, user_home)
}

pub(crate) fn expand_home_with<F>(
    path: &str,
    home: Option<&Path>,
    lookup_user: F,
) -> Result<PathBuf, MaterializeError>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let Some(after_tilde) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };
    let (user, rest) = match after_tilde.find('/') {
        Some(idx) => (&after_tilde[..idx], after_tilde[idx..].trim_start_matches('/')),
        None => (after_tilde, ""),
    };

    let base = if user.is_empty() {
        home.ok_or(MaterializeError::HomeUnavailable)?.to_path_buf()
    } else {
        match lookup_user(user) {
            Some(dir) => dir,
            None => return Ok(PathBuf::from(path)),
        }
    };

    if rest.is_empty() {
        Ok(base)
    } else {
        Ok(base.join(rest))
    }
}

/// Home directory of `name` from the passwd database.
#[cfg(unix)]
pub fn user_home(name: &str) -> Option<PathBuf> {
    use std::ffi::{CStr, CString, OsStr};
    use std::os::unix::ffi::OsStrExt;

    let name = CString::new(name).ok()?;
    let mut buf: Vec<libc::c_char> = vec![0; 1024];

    loop {
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(name.as_ptr(), &mut pwd, buf.as_mut_ptr(), buf.len(), &mut found)
        };

        if rc == libc::ERANGE && buf.len() < (1 << 20) {
            let grown = buf.len() * 2;
            buf.resize(grown, 0);
            continue;
        }
        if rc != 0 || found.is_null() || pwd.pw_dir.is_null() {
            return None;
        }

        // pw_dir points into `buf`, which outlives this borrow
        let dir = unsafe { CStr::from_ptr(pwd.pw_dir) };
        return Some(PathBuf::from(OsStr::from_bytes(dir.to_bytes())));
    }
}

#[cfg(not(unix))]
pub fn user_home(_name: &str) -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_users(_: &str) -> Option<PathBuf> {
        None
    }

    #[test]
    fn test_expand_bare_tilde() {
        let home = Path::new("/home/alice");
        assert_eq!(expand_home("~", Some(home)).unwrap(), PathBuf::from("/home/alice"));
    }

    #[test]
    fn test_expand_tilde_slash() {
        let home = Path::new("/home/alice");
        assert_eq!(
            expand_home("~/new_file.txt", Some(home)).unwrap(),
            PathBuf::from("/home/alice/new_file.txt")
        );
        assert_eq!(
            expand_home("~//nested/a.txt", Some(home)).unwrap(),
            PathBuf::from("/home/alice/nested/a.txt")
        );
    }

    #[test]
    fn test_tilde_matches_explicit_home_path() {
        let home = Path::new("/var/lib/svc");
        let via_tilde = expand_home("~/x.txt", Some(home)).unwrap();
        let explicit = expand_home("/var/lib/svc/x.txt", Some(home)).unwrap();
        assert_eq!(via_tilde, explicit);
    }

    #[test]
    fn test_other_paths_untouched() {
        assert_eq!(expand_home("/tmp/x.txt", None).unwrap(), PathBuf::from("/tmp/x.txt"));
        assert_eq!(expand_home("relative/x", None).unwrap(), PathBuf::from("relative/x"));
        assert_eq!(expand_home("a/~/b", None).unwrap(), PathBuf::from("a/~/b"));
    }

    #[test]
    fn test_named_user_expansion() {
        let lookup = |name: &str| (name == "bob").then(|| PathBuf::from("/home/bob"));

        assert_eq!(
            expand_home_with("~bob/notes.txt", None, lookup).unwrap(),
            PathBuf::from("/home/bob/notes.txt")
        );
        assert_eq!(expand_home_with("~bob", None, lookup).unwrap(), PathBuf::from("/home/bob"));
        assert_eq!(
            expand_home_with("~carol/x", None, lookup).unwrap(),
            PathBuf::from("~carol/x")
        );
        assert_eq!(
            expand_home_with("~/x", Some(Path::new("/home/alice")), no_users).unwrap(),
            PathBuf::from("/home/alice/x")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_root_home_from_passwd() {
        let root_home = user_home("root").expect("root has a passwd entry");
        assert!(root_home.is_absolute());
        assert_eq!(expand_home("~root/x", None).unwrap(), root_home.join("x"));
        assert_eq!(expand_home("~root", None).unwrap(), root_home);
    }

    #[test]
    fn test_unknown_user_left_literal() {
        let path = "~no-such-user-seedfile/x";
        assert_eq!(expand_home(path, None).unwrap(), PathBuf::from(path));
    }

    #[test]
    fn test_missing_home() {
        let err = expand_home("~/x", None).unwrap_err();
        assert!(matches!(err, MaterializeError::HomeUnavailable));
    }
}
