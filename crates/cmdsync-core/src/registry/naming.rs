//! Unique name resolution
//!
//! Suffixes are `-N` with the smallest free `N >= 1`, bounded by the
//! configured maximum.

use crate::config::{NamePolicy, NamingConfig};
use crate::errors::{CommandError, Result};

/// How the name of an inserted command is chosen
#[derive(Debug, Clone, Copy)]
pub(crate) enum NameRequest<'a> {
    /// Name proposed by a type template; subject to the naming policy
    Template(&'a str),
    /// Copy of an existing command; always suffixed
    DuplicateOf(&'a str),
    /// Caller-chosen name; must be free
    Exact(&'a str),
}

pub(crate) fn resolve_name<F>(request: NameRequest<'_>, naming: &NamingConfig, taken: F) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    match request {
        NameRequest::Template(base) => {
            if !taken(base) {
                return Ok(base.to_string());
            }
            match naming.policy {
                NamePolicy::Reject => Err(CommandError::DuplicateName {
                    name: base.to_string(),
                }),
                NamePolicy::AutoSuffix => first_free_suffix(base, naming.max_name_suffix, &taken),
            }
        }
        NameRequest::DuplicateOf(base) => first_free_suffix(base, naming.max_name_suffix, &taken),
        NameRequest::Exact(name) => {
            if taken(name) {
                Err(CommandError::DuplicateName {
                    name: name.to_string(),
                })
            } else {
                Ok(name.to_string())
            }
        }
    }
}

fn first_free_suffix<F>(base: &str, max_suffix: u32, taken: &F) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    (1..=max_suffix)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .ok_or_else(|| CommandError::DuplicateName {
            name: base.to_string(),
        })
}

/// Reject empty or whitespace-only names
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CommandError::InvalidName {
            reason: "Command name cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken_from<'a>(names: &'a [&'a str]) -> impl Fn(&str) -> bool + 'a {
        move |candidate| names.contains(&candidate)
    }

    #[test]
    fn test_free_template_name_kept() {
        let name = resolve_name(
            NameRequest::Template("build"),
            &NamingConfig::default(),
            taken_from(&["run"]),
        )
        .unwrap();
        assert_eq!(name, "build");
    }

    #[test]
    fn test_taken_template_name_gets_smallest_free_suffix() {
        let name = resolve_name(
            NameRequest::Template("build"),
            &NamingConfig::default(),
            taken_from(&["build", "build-1", "build-3"]),
        )
        .unwrap();
        assert_eq!(name, "build-2");
    }

    #[test]
    fn test_reject_policy() {
        let naming = NamingConfig {
            policy: NamePolicy::Reject,
            ..NamingConfig::default()
        };
        let result = resolve_name(NameRequest::Template("build"), &naming, taken_from(&["build"]));
        assert_eq!(
            result,
            Err(CommandError::DuplicateName {
                name: "build".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_always_suffixes_even_under_reject() {
        let naming = NamingConfig {
            policy: NamePolicy::Reject,
            ..NamingConfig::default()
        };
        let name = resolve_name(NameRequest::DuplicateOf("run"), &naming, taken_from(&["run"])).unwrap();
        assert_eq!(name, "run-1");
    }

    #[test]
    fn test_suffix_exhaustion() {
        let naming = NamingConfig {
            max_name_suffix: 2,
            ..NamingConfig::default()
        };
        let result = resolve_name(
            NameRequest::DuplicateOf("t"),
            &naming,
            taken_from(&["t", "t-1", "t-2"]),
        );
        assert!(matches!(result, Err(CommandError::DuplicateName { .. })));
    }

    #[test]
    fn test_exact_name_must_be_free() {
        let naming = NamingConfig::default();
        assert!(resolve_name(NameRequest::Exact("a"), &naming, taken_from(&["a"])).is_err());
        assert_eq!(
            resolve_name(NameRequest::Exact("b"), &naming, taken_from(&["a"])).unwrap(),
            "b"
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("build").is_ok());
        assert!(matches!(
            validate_name(" \t"),
            Err(CommandError::InvalidName { .. })
        ));
    }
}
