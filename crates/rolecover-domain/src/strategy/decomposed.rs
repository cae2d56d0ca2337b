use super::{diagnose, CoverageStrategy};
use crate::model::{PermissionGrant, ResourceMatching, RuleCollection};
use crate::report::Uncovered;

/// Breaks the user grant into single `(group, resource, verb, name)` requests and requires
/// each to be dominated by some reference grant. Different requests may be satisfied by
/// different reference grants, matching the Kubernetes escalation check.
///
/// A `"*"` value stays one request, so it still needs a `"*"` grant. A reference
/// resource `"*/<sub>"` grants `<sub>` of any resource.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decomposed;

impl CoverageStrategy for Decomposed {
    fn name(&self) -> &'static str {
        "decomposed"
    }

    fn check(&self, user: &PermissionGrant, reference: &RuleCollection) -> Result<(), Uncovered> {
        for atom in user.atoms() {
            let outcome = diagnose(&atom, reference.grants(), ResourceMatching::SubresourceWildcard);
            if let Err(mut miss) = outcome {
                miss.atom = Some(atom);
                return Err(miss);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Axis;
    use crate::report::Missing;
    use crate::test_support::{collection, grant};

    #[test]
    fn combines_reference_rules_across_groups() {
        let user = grant(
            &["", "apps", "appstudio.redhat.com"],
            &["configmaps", "deployments", "applications"],
            &["get", "list"],
        );
        let reference = collection(vec![
            grant(&[""], &["*"], &["get", "list", "watch"]),
            grant(&["apps"], &["*"], &["get", "list", "watch"]),
            grant(&["appstudio.redhat.com"], &["*"], &["*"]),
        ]);
        assert!(Decomposed.check(&user, &reference).is_ok());
    }

    #[test]
    fn reports_first_uncovered_request() {
        let user = grant(&["tekton.dev"], &["pipelineruns"], &["get", "delete"]);
        let reference = collection(vec![grant(&["tekton.dev"], &["pipelineruns"], &["get", "patch"])]);
        let miss = Decomposed.check(&user, &reference).expect_err("uncovered");
        assert_eq!(miss.failures[0].axis, Axis::Verbs);
        assert_eq!(
            miss.failures[0].missing,
            Missing::Values(vec!["delete".to_string()])
        );
        assert_eq!(
            miss.atom,
            Some(grant(&["tekton.dev"], &["pipelineruns"], &["delete"]))
        );
    }

    #[test]
    fn wildcard_request_is_not_assembled_from_literals() {
        let user = grant(&[""], &["pods"], &["*"]);
        let reference = collection(vec![
            grant(&[""], &["pods"], &["get", "list", "watch"]),
            grant(&[""], &["pods"], &["create", "update", "patch", "delete"]),
        ]);
        let miss = Decomposed.check(&user, &reference).expect_err("uncovered");
        assert_eq!(miss.failures[0].missing, Missing::Everything);
    }

    #[test]
    fn each_name_may_come_from_a_different_rule() {
        let user = grant(&[""], &["configmaps"], &["get"]).with_names(&["a", "b"]);
        let reference = collection(vec![
            grant(&[""], &["configmaps"], &["get"]).with_names(&["a"]),
            grant(&[""], &["configmaps"], &["get"]).with_names(&["b"]),
        ]);
        assert!(Decomposed.check(&user, &reference).is_ok());
    }

    #[test]
    fn any_resource_subresource_grant_covers_specific_subresource() {
        let user = grant(&["apps"], &["deployments/scale"], &["update"]);
        let reference = collection(vec![grant(&["apps"], &["*/scale"], &["update"])]);
        assert!(Decomposed.check(&user, &reference).is_ok());
    }

    #[test]
    fn any_resource_subresource_grant_does_not_cover_the_resource_itself() {
        let user = grant(&["apps"], &["deployments", "deployments/scale"], &["update"]);
        let reference = collection(vec![grant(&["apps"], &["*/scale"], &["update"])]);
        let miss = Decomposed.check(&user, &reference).expect_err("uncovered");
        assert_eq!(miss.failures[0].axis, Axis::Resources);
        assert_eq!(
            miss.failures[0].missing,
            Missing::Values(vec!["deployments".to_string()])
        );
    }

    #[test]
    fn stops_at_first_uncovered_request() {
        let many: Vec<String> = (0..500).map(|i| format!("verb{i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let user = grant(&["a", "b"], &many, &many);
        let reference = collection(vec![grant(&["b"], &["*"], &["*"])]);
        let miss = Decomposed.check(&user, &reference).expect_err("uncovered");
        assert_eq!(miss.atom, Some(grant(&["a"], &["verb0"], &["verb0"])));
    }
}
