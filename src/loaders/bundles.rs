/// Predefined groups of Telegraf input plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BundleName {
    System,
    Docker,
    Kubernetes,
    Nginx,
    Redis,
}

impl BundleName {
    pub const ALL: [BundleName; 5] = [
        BundleName::System,
        BundleName::Docker,
        BundleName::Kubernetes,
        BundleName::Nginx,
        BundleName::Redis,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BundleName::System => "System",
            BundleName::Docker => "Docker",
            BundleName::Kubernetes => "Kubernetes",
            BundleName::Nginx => "NGINX",
            BundleName::Redis => "Redis",
        }
    }

    /// Input plugins installed by this bundle
    pub fn plugins(&self) -> &'static [&'static str] {
        match self {
            BundleName::System => &[
                "cpu", "disk", "diskio", "kernel", "mem", "processes", "swap", "system",
            ],
            BundleName::Docker => &["docker"],
            BundleName::Kubernetes => &["kubernetes"],
            BundleName::Nginx => &["nginx"],
            BundleName::Redis => &["redis"],
        }
    }
}

/// Whether a plugin works without any user-supplied settings
pub fn requires_config(plugin: &str) -> bool {
    matches!(plugin, "docker" | "kubernetes" | "nginx" | "redis")
}

/// Config fields a plugin exposes in the Configure step, with whether each one is a list
pub fn config_fields(plugin: &str) -> &'static [(&'static str, bool)] {
    match plugin {
        "docker" => &[("endpoint", false)],
        "kubernetes" => &[("url", false)],
        "nginx" => &[("urls", true)],
        "redis" => &[("servers", true), ("password", false)],
        _ => &[],
    }
}

/// Fields whose values are masked on screen
pub fn is_secret_field(field: &str) -> bool {
    matches!(field, "password" | "token")
}
