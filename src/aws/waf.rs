//! AWS WAF IP set operations via the AWS CLI.

use super::cli;
use super::store::IpSetStore;
use crate::config::Config;
use crate::error::ImportError;
use crate::models::{ChangeToken, IpSetHandle, IpSetSummary, IpSetUpdate};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ListIpSetsResponse {
    #[serde(rename = "IPSets", default)]
    ip_sets: Vec<IpSetSummary>,
    next_marker: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct ChangeTokenResponse {
    change_token: ChangeToken,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateIpSetResponse {
    #[serde(rename = "IPSet")]
    ip_set: IpSetSummary,
}

/// [`IpSetStore`] backed by `aws waf-regional` (or `aws waf`) commands.
#[derive(Debug, Clone)]
pub struct AwsCliWaf {
    program: String,
    service: String,
    region: Option<String>,
    profile: Option<String>,
    list_limit: u32,
}

impl AwsCliWaf {
    pub fn new(config: &Config) -> Self {
        AwsCliWaf {
            program: config.aws_cli.clone(),
            service: config.waf_service.clone(),
            region: config.region.clone(),
            profile: config.profile.clone(),
            list_limit: config.list_limit,
        }
    }

    /// Full argument list for one service operation, always asking for JSON.
    fn command_args(&self, operation: &str, extra: Vec<String>) -> Vec<String> {
        let mut args = vec![self.service.clone(), operation.to_string()];
        args.extend(extra);
        if let Some(region) = &self.region {
            args.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(profile) = &self.profile {
            args.extend(["--profile".to_string(), profile.clone()]);
        }
        args.extend(["--output".to_string(), "json".to_string()]);
        args
    }

    fn call<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        extra: Vec<String>,
    ) -> Result<T, ImportError> {
        let args = self.command_args(operation, extra);
        let output =
            cli::run_args(&self.program, &args).map_err(|e| ImportError::remote(operation, e))?;
        parse_response(operation, &output)
    }
}

/// Decode a CLI JSON response, naming the failing path on error.
fn parse_response<T: DeserializeOwned>(
    operation: &'static str,
    output: &str,
) -> Result<T, ImportError> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        ImportError::remote(
            operation,
            format!("Error parsing JSON: path={} error={}", e.path(), e),
        )
    })
}

impl IpSetStore for AwsCliWaf {
    fn list_ip_sets(&mut self) -> Result<Vec<IpSetSummary>, ImportError> {
        let mut ip_sets = Vec::new();
        let mut marker: Option<String> = None;
        let mut seen_markers: HashSet<String> = HashSet::new();
        let mut count_pages = 0;

        loop {
            let mut extra = vec!["--limit".to_string(), self.list_limit.to_string()];
            if let Some(marker) = &marker {
                extra.extend(["--next-marker".to_string(), marker.clone()]);
            }
            let page: ListIpSetsResponse = self.call("list-ip-sets", extra)?;
            log::info!(
                "got page#{count_pages:2} ip_sets=+{count:3} next_marker={next:?}",
                count = page.ip_sets.len(),
                next = page.next_marker,
            );
            ip_sets.extend(page.ip_sets);
            count_pages += 1;

            match page.next_marker {
                Some(next) if !next.is_empty() => {
                    if !seen_markers.insert(next.clone()) {
                        return Err(ImportError::remote(
                            "list-ip-sets",
                            format!("Next marker '{next}' seen before - possible infinite loop"),
                        ));
                    }
                    marker = Some(next);
                }
                _ => break,
            }
        }

        Ok(ip_sets)
    }

    fn get_change_token(&mut self) -> Result<ChangeToken, ImportError> {
        let response: ChangeTokenResponse = self.call("get-change-token", vec![])?;
        Ok(response.change_token)
    }

    fn create_ip_set(
        &mut self,
        name: &str,
        token: &ChangeToken,
    ) -> Result<IpSetHandle, ImportError> {
        let extra = vec![
            "--name".to_string(),
            name.to_string(),
            "--change-token".to_string(),
            token.as_str().to_string(),
        ];
        let response: CreateIpSetResponse = self.call("create-ip-set", extra)?;
        Ok(IpSetHandle {
            ip_set_id: response.ip_set.ip_set_id,
            name: response.ip_set.name,
        })
    }

    fn update_ip_set(
        &mut self,
        ip_set: &IpSetHandle,
        token: &ChangeToken,
        updates: &[IpSetUpdate],
    ) -> Result<(), ImportError> {
        let updates_json =
            serde_json::to_string(updates).map_err(|e| ImportError::remote("update-ip-set", e))?;
        let extra = vec![
            "--ip-set-id".to_string(),
            ip_set.ip_set_id.clone(),
            "--change-token".to_string(),
            token.as_str().to_string(),
            "--updates".to_string(),
            updates_json,
        ];
        let _: ChangeTokenResponse = self.call("update-ip-set", extra)?;
        Ok(())
    }
}
