use std::path::PathBuf;

use clap::Args;

pub type CmdResult<T> = gfxmigrate::Result<(T, i32)>;

pub mod audit;
pub mod migrate;

/// Arguments shared by every scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Root directories to scan (default: app/ and components/)
    pub roots: Vec<String>,

    /// Scan a single directory instead of the default roots
    #[arg(long, value_name = "PATH")]
    pub dir: Option<String>,

    /// Emit a JSON result envelope instead of streaming text
    #[arg(long)]
    pub json: bool,
}

/// Resolve scan roots from arguments.
///
/// Explicitly-given roots (positional or --dir) must exist: that is the
/// fail-fast configuration class. Default roots may be absent; the walker
/// treats a missing directory as empty, matching the audit scripts this
/// tool replaces.
pub(crate) fn resolve_roots(scan: &ScanArgs) -> gfxmigrate::Result<Vec<PathBuf>> {
    if let Some(dir) = &scan.dir {
        return explicit_roots(std::slice::from_ref(dir));
    }
    if !scan.roots.is_empty() {
        return explicit_roots(&scan.roots);
    }
    Ok(gfxmigrate::rules::DEFAULT_ROOTS
        .iter()
        .map(PathBuf::from)
        .collect())
}

fn explicit_roots(roots: &[String]) -> gfxmigrate::Result<Vec<PathBuf>> {
    let mut resolved = Vec::with_capacity(roots.len());
    for root in roots {
        let path = PathBuf::from(root);
        if !path.is_dir() {
            return Err(gfxmigrate::Error::RootNotFound(root.clone()));
        }
        resolved.push(path);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(roots: Vec<String>, dir: Option<String>) -> ScanArgs {
        ScanArgs {
            roots,
            dir,
            json: false,
        }
    }

    #[test]
    fn defaults_are_used_when_nothing_is_given() {
        let roots = resolve_roots(&scan(vec![], None)).unwrap();
        assert_eq!(roots, vec![PathBuf::from("app"), PathBuf::from("components")]);
    }

    #[test]
    fn missing_explicit_root_fails_fast() {
        let err = resolve_roots(&scan(vec!["/nonexistent/root".to_string()], None)).unwrap_err();
        assert_eq!(err.code(), "ROOT_NOT_FOUND");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn dir_overrides_positional_roots() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().to_string();
        let roots = resolve_roots(&scan(
            vec!["/nonexistent/ignored".to_string()],
            Some(dir.clone()),
        ))
        .unwrap();
        assert_eq!(roots, vec![PathBuf::from(dir)]);
    }
}
