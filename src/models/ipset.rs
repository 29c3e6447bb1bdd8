//! WAF IP set records exchanged with the remote service.

use super::NetworkBlock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a `list-ip-sets` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetSummary {
    #[serde(rename = "IPSetId")]
    pub ip_set_id: String,
    pub name: String,
}

/// Reference to an IP set created during this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpSetHandle {
    pub ip_set_id: String,
    pub name: String,
}

impl fmt::Display for IpSetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.ip_set_id)
    }
}

/// Single-use token authorising one mutating call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChangeToken(pub String);

impl ChangeToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateAction {
    Insert,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DescriptorType {
    Ipv4,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetDescriptor {
    #[serde(rename = "Type")]
    pub kind: DescriptorType,
    pub value: NetworkBlock,
}

/// One element of an `update-ip-set` call, in the shape the WAF API expects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct IpSetUpdate {
    pub action: UpdateAction,
    #[serde(rename = "IPSetDescriptor")]
    pub descriptor: IpSetDescriptor,
}

impl IpSetUpdate {
    pub fn insert(block: NetworkBlock) -> Self {
        IpSetUpdate {
            action: UpdateAction::Insert,
            descriptor: IpSetDescriptor {
                kind: DescriptorType::Ipv4,
                value: block,
            },
        }
    }

    pub fn block(&self) -> NetworkBlock {
        self.descriptor.value
    }
}
