use crate::error::{RuleError, StructuralError};
use crate::report::{AxisFailure, Missing};
use rolecover_types::{PolicyRule, WILDCARD};
use std::collections::BTreeSet;
use std::fmt;

/// Which collection a rule belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    User,
    Reference,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::User => "userRules",
            Side::Reference => "referenceRules",
        })
    }
}

/// The four permission axes, in the canonical order diagnostics use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    ApiGroups,
    Resources,
    Verbs,
    ResourceNames,
}

impl Axis {
    /// Wire name of the axis.
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::ApiGroups => "apiGroups",
            Axis::Resources => "resources",
            Axis::Verbs => "verbs",
            Axis::ResourceNames => "resourceNames",
        }
    }

    /// Finding code reported when this axis is the first one left uncovered.
    pub fn code(self) -> &'static str {
        use rolecover_types::ids;
        match self {
            Axis::ApiGroups => ids::CODE_API_GROUPS_NOT_COVERED,
            Axis::Resources => ids::CODE_RESOURCES_NOT_COVERED,
            Axis::Verbs => ids::CODE_VERBS_NOT_COVERED,
            Axis::ResourceNames => ids::CODE_RESOURCE_NAMES_NOT_COVERED,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values on the `apiGroups`, `resources` or `verbs` axis.
///
/// `"*"` is absorbing: a list containing it collapses to `All`, whatever else it lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisSet {
    All,
    Explicit(BTreeSet<String>),
}

impl AxisSet {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for v in values {
            let v = v.as_ref();
            if v == WILDCARD {
                return AxisSet::All;
            }
            set.insert(v.to_string());
        }
        AxisSet::Explicit(set)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, AxisSet::All)
    }

    /// What `self` asks for that `granted` does not give; `None` when fully covered.
    pub fn uncovered_by(&self, granted: &AxisSet) -> Option<Missing> {
        self.uncovered_by_matching(granted, ResourceMatching::Exact)
    }

    /// Like [`AxisSet::uncovered_by`], comparing individual values with `matching`.
    pub fn uncovered_by_matching(
        &self,
        granted: &AxisSet,
        matching: ResourceMatching,
    ) -> Option<Missing> {
        match (self, granted) {
            (_, AxisSet::All) => None,
            (AxisSet::All, AxisSet::Explicit(_)) => Some(Missing::Everything),
            (AxisSet::Explicit(asked), AxisSet::Explicit(given)) => {
                let missing: Vec<String> = asked
                    .iter()
                    .filter(|value| !matching.grants(given, value))
                    .cloned()
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(Missing::Values(missing))
                }
            }
        }
    }

    /// Split into single-valued sets. `All` stays a single atom; an empty set has none.
    pub fn atoms(&self) -> impl Iterator<Item = AxisSet> + '_ {
        let (all, values) = match self {
            AxisSet::All => (Some(AxisSet::All), None),
            AxisSet::Explicit(values) => (None, Some(values)),
        };
        all.into_iter().chain(
            values
                .into_iter()
                .flatten()
                .map(|v| AxisSet::Explicit(BTreeSet::from([v.clone()]))),
        )
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisSet::All => write!(f, "[{WILDCARD:?}]"),
            AxisSet::Explicit(values) => write!(f, "{:?}", values.iter().collect::<Vec<_>>()),
        }
    }
}

/// The optional `resourceNames` axis.
///
/// Names have no wildcard: `"*"` here is an ordinary name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameScope {
    Unscoped,
    Named(BTreeSet<String>),
}

impl NameScope {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = values.into_iter().map(|v| v.as_ref().to_string()).collect();
        if names.is_empty() {
            NameScope::Unscoped
        } else {
            NameScope::Named(names)
        }
    }

    pub fn is_unscoped(&self) -> bool {
        matches!(self, NameScope::Unscoped)
    }

    pub fn uncovered_by(&self, granted: &NameScope) -> Option<Missing> {
        match (self, granted) {
            (_, NameScope::Unscoped) => None,
            (NameScope::Unscoped, NameScope::Named(_)) => Some(Missing::Everything),
            (NameScope::Named(asked), NameScope::Named(given)) => {
                let missing: Vec<String> = asked.difference(given).cloned().collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(Missing::Values(missing))
                }
            }
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = NameScope> + '_ {
        let (unscoped, names) = match self {
            NameScope::Unscoped => (Some(NameScope::Unscoped), None),
            NameScope::Named(names) => (None, Some(names)),
        };
        unscoped.into_iter().chain(
            names
                .into_iter()
                .flatten()
                .map(|n| NameScope::Named(BTreeSet::from([n.clone()]))),
        )
    }
}

/// How a requested resource is matched against granted resources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResourceMatching {
    /// Literal equality only; `pods/*` is an ordinary string.
    #[default]
    Exact,
    /// A granted `*/<sub>` also grants `<sub>` of every resource, as the Kubernetes
    /// escalation check does. Other values still match literally.
    SubresourceWildcard,
}

impl ResourceMatching {
    fn grants(self, given: &BTreeSet<String>, asked: &str) -> bool {
        if given.contains(asked) {
            return true;
        }
        match self {
            ResourceMatching::Exact => false,
            ResourceMatching::SubresourceWildcard => asked
                .split_once('/')
                .is_some_and(|(_, sub)| given.contains(&format!("{WILDCARD}/{sub}"))),
        }
    }
}

/// One validated rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionGrant {
    pub api_groups: AxisSet,
    pub resources: AxisSet,
    pub verbs: AxisSet,
    pub resource_names: NameScope,
}

impl PermissionGrant {
    /// Validate a wire rule. No defaults are applied: a missing axis is an error.
    pub fn from_rule(rule: &PolicyRule) -> Result<Self, RuleError> {
        if rule.non_resource_urls.as_ref().is_some_and(|u| !u.is_empty()) {
            return Err(RuleError::UnsupportedNonResourceUrls);
        }
        let api_groups = rule
            .api_groups
            .as_ref()
            .ok_or(RuleError::MissingAxis(Axis::ApiGroups))?;
        let resources = rule
            .resources
            .as_ref()
            .ok_or(RuleError::MissingAxis(Axis::Resources))?;
        let verbs = rule
            .verbs
            .as_ref()
            .ok_or(RuleError::MissingAxis(Axis::Verbs))?;

        Ok(Self {
            api_groups: AxisSet::from_values(api_groups),
            resources: AxisSet::from_values(resources),
            verbs: AxisSet::from_values(verbs),
            resource_names: NameScope::from_values(rule.resource_names.iter().flatten()),
        })
    }

    /// Every axis on which `reference` fails to grant what `self` asks for,
    /// in canonical axis order. Empty means `reference` dominates `self`.
    pub fn failures_against(&self, reference: &PermissionGrant) -> Vec<AxisFailure> {
        self.failures_against_matching(reference, ResourceMatching::Exact)
    }

    pub fn failures_against_matching(
        &self,
        reference: &PermissionGrant,
        matching: ResourceMatching,
    ) -> Vec<AxisFailure> {
        let mut out = Vec::new();
        let checks = [
            (Axis::ApiGroups, self.api_groups.uncovered_by(&reference.api_groups)),
            (
                Axis::Resources,
                self.resources
                    .uncovered_by_matching(&reference.resources, matching),
            ),
            (Axis::Verbs, self.verbs.uncovered_by(&reference.verbs)),
            (
                Axis::ResourceNames,
                self.resource_names.uncovered_by(&reference.resource_names),
            ),
        ];
        for (axis, missing) in checks {
            if let Some(missing) = missing {
                out.push(AxisFailure { axis, missing });
            }
        }
        out
    }

    pub fn is_dominated_by(&self, reference: &PermissionGrant) -> bool {
        self.failures_against(reference).is_empty()
    }

    /// Single `(group, resource, verb, name)` requests, produced lazily so callers
    /// can stop at the first uncovered one.
    pub fn atoms(&self) -> impl Iterator<Item = PermissionGrant> + '_ {
        self.api_groups.atoms().flat_map(move |groups| {
            self.resources.atoms().flat_map(move |resources| {
                let groups = groups.clone();
                self.verbs.atoms().flat_map(move |verbs| {
                    let groups = groups.clone();
                    let resources = resources.clone();
                    self.resource_names.atoms().map(move |names| PermissionGrant {
                        api_groups: groups.clone(),
                        resources: resources.clone(),
                        verbs: verbs.clone(),
                        resource_names: names,
                    })
                })
            })
        })
    }
}

impl fmt::Display for PermissionGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{apiGroups: {}, resources: {}, verbs: {}",
            self.api_groups, self.resources, self.verbs
        )?;
        if let NameScope::Named(names) = &self.resource_names {
            write!(f, ", resourceNames: {:?}", names.iter().collect::<Vec<_>>())?;
        }
        f.write_str("}")
    }
}

/// An ordered, validated set of grants. Order only matters for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleCollection {
    grants: Vec<PermissionGrant>,
}

impl RuleCollection {
    /// Validate every rule; the first bad rule aborts with its position.
    pub fn from_rules(side: Side, rules: &[PolicyRule]) -> Result<Self, StructuralError> {
        let grants = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                PermissionGrant::from_rule(rule).map_err(|cause| StructuralError::new(side, index, cause))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { grants })
    }

    pub fn grants(&self) -> &[PermissionGrant] {
        &self.grants
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

impl From<Vec<PermissionGrant>> for RuleCollection {
    fn from(grants: Vec<PermissionGrant>) -> Self {
        Self { grants }
    }
}
