pub mod target_ref;
pub mod upstream_settings_policy;

pub use self::{
    target_ref::LocalTargetRef,
    upstream_settings_policy::{
        Duration, Size, UpstreamKeepAlive, UpstreamSettingsPolicy, UpstreamSettingsPolicySpec,
    },
};

/// Checks whether a group/kind pair names the given resource type.
///
/// An empty or missing group is treated as the `core` API group.
fn targets_kind<T>(group: Option<&str>, kind: &str) -> bool
where
    T: kube::Resource,
    T::DynamicType: Default,
{
    let dt = Default::default();

    let t_group = T::group(&dt);
    let t_group = if t_group.is_empty() { "core" } else { &*t_group };

    let group = match group {
        Some("") | None => "core",
        Some(g) => g,
    };

    group.eq_ignore_ascii_case(t_group) && kind.eq_ignore_ascii_case(&T::kind(&dt))
}
