//! Catalog of cache control-plane operations.
//!
//! Each function returns the immutable [`Command`] metadata for one remote
//! operation: its parameters, aliases, default output selector, whether it
//! mutates service state and how it paginates.  This is data, not logic;
//! adding an operation means adding a parameter table and a constructor.

use crate::command::{Command, ParamKind, ParamSpec};

const ADD_TAGS_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "ResourceName",
        kind: ParamKind::Str,
        required: true,
        aliases: &["Arn", "ResourceArn"],
    },
    ParamSpec {
        name: "Tags",
        kind: ParamKind::MapList,
        required: true,
        aliases: &["Tag"],
    },
];

/// AddTagsToResource: attach tags to a resource.  Returns the resulting
/// tag list.
pub fn add_tags_to_resource() -> Command {
    Command::new("AddTagsToResource", ADD_TAGS_PARAMS)
        .mutating()
        .select_field("TagList")
}

const REMOVE_TAGS_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "ResourceName",
        kind: ParamKind::Str,
        required: true,
        aliases: &["Arn", "ResourceArn"],
    },
    // Optional on purpose: an explicitly empty key list clears nothing but
    // is still sent, while an unbound one is omitted from the request.
    ParamSpec {
        name: "TagKeys",
        kind: ParamKind::StrList,
        required: false,
        aliases: &["TagKey"],
    },
];

/// RemoveTagsFromResource: detach tags from a resource.  Returns the
/// remaining tag list.
pub fn remove_tags_from_resource() -> Command {
    Command::new("RemoveTagsFromResource", REMOVE_TAGS_PARAMS)
        .mutating()
        .select_field("TagList")
}

const LIST_TAGS_PARAMS: &[ParamSpec] = &[ParamSpec {
    name: "ResourceName",
    kind: ParamKind::Str,
    required: true,
    aliases: &["Arn", "ResourceArn"],
}];

/// ListTagsForResource: read the tags on a resource.
pub fn list_tags_for_resource() -> Command {
    Command::new("ListTagsForResource", LIST_TAGS_PARAMS).select_field("TagList")
}

const DESCRIBE_CLUSTERS_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "CacheClusterId",
        kind: ParamKind::Str,
        required: false,
        aliases: &["ClusterId"],
    },
    ParamSpec {
        name: "MaxRecords",
        kind: ParamKind::Int,
        required: false,
        aliases: &[],
    },
    ParamSpec {
        name: "ShowCacheNodeInfo",
        kind: ParamKind::Bool,
        required: false,
        aliases: &[],
    },
];

/// DescribeCacheClusters: list clusters, one page per marker.
pub fn describe_cache_clusters() -> Command {
    Command::new("DescribeCacheClusters", DESCRIBE_CLUSTERS_PARAMS)
        .select_field("CacheClusters")
        .paginated("Marker", "Marker")
}

const CREATE_CLUSTER_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "CacheClusterId",
        kind: ParamKind::Str,
        required: true,
        aliases: &["ClusterId"],
    },
    ParamSpec {
        name: "Engine",
        kind: ParamKind::Enum(&["memcached", "redis", "valkey"]),
        required: true,
        aliases: &[],
    },
    ParamSpec {
        name: "CacheNodeType",
        kind: ParamKind::Str,
        required: false,
        aliases: &["NodeType"],
    },
    ParamSpec {
        name: "NumCacheNodes",
        kind: ParamKind::Int,
        required: false,
        aliases: &[],
    },
    ParamSpec {
        name: "SecurityGroupIds",
        kind: ParamKind::StrList,
        required: false,
        aliases: &[],
    },
];

/// CreateCacheCluster: provision a new cluster.
pub fn create_cache_cluster() -> Command {
    Command::new("CreateCacheCluster", CREATE_CLUSTER_PARAMS)
        .mutating()
        .select_field("CacheCluster")
}

const DELETE_CLUSTER_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "CacheClusterId",
        kind: ParamKind::Str,
        required: true,
        aliases: &["ClusterId"],
    },
    ParamSpec {
        name: "FinalSnapshotIdentifier",
        kind: ParamKind::Str,
        required: false,
        aliases: &[],
    },
];

/// DeleteCacheCluster: tear a cluster down.
pub fn delete_cache_cluster() -> Command {
    Command::new("DeleteCacheCluster", DELETE_CLUSTER_PARAMS)
        .mutating()
        .select_field("CacheCluster")
}

const REBOOT_CLUSTER_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        name: "CacheClusterId",
        kind: ParamKind::Str,
        required: true,
        aliases: &["ClusterId"],
    },
    ParamSpec {
        name: "CacheNodeIdsToReboot",
        kind: ParamKind::StrList,
        required: true,
        aliases: &["NodeId"],
    },
];

/// RebootCacheCluster: reboot some or all nodes of a cluster.
pub fn reboot_cache_cluster() -> Command {
    Command::new("RebootCacheCluster", REBOOT_CLUSTER_PARAMS)
        .mutating()
        .select_field("CacheCluster")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;

    #[test]
    fn catalog_metadata_is_consistent() {
        let describe = describe_cache_clusters();
        assert!(describe.is_paginated());
        assert!(!describe.is_mutating());
        assert_eq!(describe.page_spec().unwrap().input_token, "Marker");

        let add = add_tags_to_resource();
        assert!(add.is_mutating());
        assert_eq!(add.default_selector(), &Selector::Field("TagList".into()));
        assert_eq!(add.canonical_name("Tag"), Some("Tags"));
    }
}
