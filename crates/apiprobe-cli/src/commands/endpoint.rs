use crate::error::CliResult;
use crate::utils::parse_pair;
use apiprobe_core::{EndpointTable, Settings};

pub struct EndpointCommand;

impl EndpointCommand {
    /// Resolve a table entry and return what would be printed
    pub fn resolve(
        settings: &Settings,
        table: &EndpointTable,
        category: &str,
        action: &str,
        params: &[String],
        full: bool,
    ) -> CliResult<String> {
        let pairs = params
            .iter()
            .map(|raw| parse_pair(raw, '='))
            .collect::<CliResult<Vec<_>>>()?;
        let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        let resolved = if full {
            table.full_url(&settings.base_url, category, action, &borrowed)?
        } else {
            table.resolve(category, action, &borrowed)?
        };
        Ok(resolved)
    }

    pub fn run(
        settings: &Settings,
        table: &EndpointTable,
        category: &str,
        action: &str,
        params: &[String],
        full: bool,
    ) -> CliResult<()> {
        println!("{}", Self::resolve(settings, table, category, action, params, full)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::bundled_endpoints;

    #[test]
    fn test_resolve_path_and_full_url() {
        let settings = Settings::from_lookup(|key| {
            (key == "API_BASE_URL").then(|| "https://api.example.com".to_string())
        })
        .unwrap();
        let table = bundled_endpoints().unwrap();
        let params = vec!["id=7".to_string()];

        assert_eq!(
            EndpointCommand::resolve(&settings, &table, "users", "get", &params, false).unwrap(),
            "/users/7"
        );
        assert_eq!(
            EndpointCommand::resolve(&settings, &table, "posts", "comments", &params, true).unwrap(),
            "https://api.example.com/posts/7/comments"
        );
        assert!(EndpointCommand::resolve(&settings, &table, "users", "get", &[], false).is_err());
        assert!(EndpointCommand::resolve(&settings, &table, "albums", "list", &[], false).is_err());
    }
}
