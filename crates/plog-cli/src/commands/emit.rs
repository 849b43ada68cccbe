//! Emit a single record through the active logger.

use anyhow::{bail, Result};
use plog::{Context, Level};

pub fn execute(level: Level, message: &str, pairs: &[String]) -> Result<i32> {
    let ctx = parse_context(pairs)?;

    let bare = ctx.is_empty();
    match level {
        Level::Fatal if bare => plog::fatalf!("{}", message),
        Level::Fatal => plog::fatalf!("{} {}", message, ctx),
        Level::Error if bare => plog::errorf!("{}", message),
        Level::Error => plog::errorc!(&ctx, "{}", message),
        Level::Warn if bare => plog::warnf!("{}", message),
        Level::Warn => plog::warnc!(&ctx, "{}", message),
        Level::Info if bare => plog::infof!("{}", message),
        Level::Info => plog::infoc!(&ctx, "{}", message),
        Level::Debug if bare => plog::debugf!("{}", message),
        Level::Debug => plog::debugc!(&ctx, "{}", message),
    }

    plog::flush();
    Ok(0)
}

/// Build a context from `key=value` pairs, later pairs shadowing earlier ones.
fn parse_context(pairs: &[String]) -> Result<Context> {
    let mut ctx = Context::background();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid context value '{}': expected KEY=VALUE", pair);
        };
        if key.is_empty() {
            bail!("Invalid context value '{}': empty key", pair);
        }
        ctx = ctx.with_value(key, value);
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_context() {
        let ctx =
            parse_context(&pairs(&["trace_id=abc", "query=a=b", "host=db1", "host=db2"])).unwrap();

        assert_eq!(ctx.trace_id(), Some("abc"));
        assert_eq!(ctx.value("query"), Some("a=b"));
        assert_eq!(ctx.value("host"), Some("db2"));
    }

    #[test]
    fn test_parse_context_empty() {
        assert!(parse_context(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_context_rejects_malformed() {
        assert!(parse_context(&pairs(&["no-separator"])).is_err());
        assert!(parse_context(&pairs(&["=value"])).is_err());
    }
}
