use super::targets_kind;

/// References a resource in the same namespace as the policy.
#[derive(
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
pub struct LocalTargetRef {
    pub group: Option<String>,
    pub kind: String,
    pub name: String,
}

impl LocalTargetRef {
    /// Returns the target ref kind, qualified by its group, if necessary.
    pub fn canonical_kind(&self) -> String {
        match self.group.as_deref() {
            Some(group) if !group.is_empty() => format!("{}.{group}", self.kind),
            _ => self.kind.clone(),
        }
    }

    /// Checks whether the target references the given resource type
    pub fn targets_kind<T>(&self) -> bool
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        targets_kind::<T>(self.group.as_deref(), &self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Service;
    use k8s_openapi::api::core::v1::ServiceAccount;

    #[test]
    fn targets_service_kind() {
        for tgt in [
            LocalTargetRef {
                group: None,
                kind: "Service".to_string(),
                name: "backend".to_string(),
            },
            LocalTargetRef {
                group: Some("".to_string()),
                kind: "Service".to_string(),
                name: "backend".to_string(),
            },
            LocalTargetRef {
                group: Some("core".to_string()),
                kind: "service".to_string(),
                name: "BACKEND".to_string(),
            },
        ] {
            assert!(tgt.targets_kind::<Service>(), "{tgt:#?}");
            assert!(!tgt.targets_kind::<ServiceAccount>(), "{tgt:#?}");
        }
    }

    #[test]
    fn canonical_kind() {
        let core = LocalTargetRef {
            group: Some("".to_string()),
            kind: "Service".to_string(),
            name: "backend".to_string(),
        };
        assert_eq!(core.canonical_kind(), "Service");

        let gateway = LocalTargetRef {
            group: Some("gateway.networking.k8s.io".to_string()),
            kind: "HTTPRoute".to_string(),
            name: "route".to_string(),
        };
        assert_eq!(gateway.canonical_kind(), "HTTPRoute.gateway.networking.k8s.io");
        assert!(!gateway.targets_kind::<Service>());
    }
}
