//! Human-readable terminal renderer.

use std::collections::BTreeMap;

use owo_colors::OwoColorize as _;

use crate::domain::config::LaunchkitConfig;
use crate::domain::service::{ExitReason, ServiceInfo, ServiceKind};
use crate::domain::target::ServiceTarget;
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("launchkit {version}");
    }

    /// Confirm one stored setting.
    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Render the mapped state of one service.
    pub fn render_service_info(&self, target: &ServiceTarget, info: &ServiceInfo) {
        if self.ctx.quiet {
            return;
        }
        println!();
        self.ctx.header(&target.to_string());
        println!();

        match &info.kind {
            ServiceKind::Daemon(daemon) => {
                self.ctx.kv("kind:         ", "daemon");
                self.ctx.kv("plist:        ", &daemon.plist_path);
                self.ctx.kv("program:      ", &daemon.program);
                if let Some(args) = &daemon.arguments {
                    self.ctx.kv("arguments:    ", &args.join(" "));
                }
                if let Some(bundle_id) = &daemon.bundle_id {
                    self.ctx.kv("bundle id:    ", bundle_id);
                }
            }
            ServiceKind::LoginItem(item) => {
                self.ctx.kv("kind:         ", "login item");
                self.ctx.kv("identifier:   ", &item.identifier);
                self.ctx.kv("parent:       ", &item.parent_identifier);
            }
        }

        let pid = info
            .pid
            .map_or_else(|| "not running".to_string(), |pid| pid.to_string());
        self.ctx.kv("pid:          ", &pid);
        if let Some(reason) = info.last_exit_reason {
            self.ctx.kv("last exit:    ", &exit_reason_display(reason));
        }

        if let Some(endpoints) = &info.endpoints {
            println!();
            println!("  {}", "Endpoints:".style(self.ctx.styles.bold));
            for endpoint in endpoints {
                println!("    {endpoint}");
            }
        }

        for (title, vars) in [
            ("Environment:", &info.environment.generic),
            ("Default environment:", &info.environment.default),
            ("Inherited environment:", &info.environment.inherited),
        ] {
            if let Some(vars) = vars {
                self.render_environment(title, vars);
            }
        }
        println!();
    }

    fn render_environment(&self, title: &str, vars: &BTreeMap<String, String>) {
        println!();
        println!("  {}", title.style(self.ctx.styles.bold));
        for (key, value) in vars {
            println!("    {key}={value}");
        }
    }

    /// Render the services loaded in a domain, one target per line.
    pub fn render_service_list(&self, services: &[ServiceTarget]) {
        if services.is_empty() {
            self.ctx.info("No services loaded.");
            return;
        }
        for service in services {
            println!("{service}");
        }
    }

    /// Render a raw `launchctl print` dump untouched.
    pub fn render_dump(&self, output: &str) {
        print!("{output}");
    }

    /// Render the current launchkit configuration.
    pub fn render_config(&self, config: &LaunchkitConfig, path: &std::path::Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<24} {}", "launchctl.path:", config.launchctl.path);
        println!(
            "  {:<24} {}",
            "launchctl.timeout_secs:", config.launchctl.timeout_secs
        );
        println!("  {:<24} {}", "plutil.path:", config.plutil.path);
        println!("  {:<24} {}", "domain.default:", config.domain.default);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<18} {}",
            format!("{CONFIG_ENV}:"),
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<18} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
    }
}

/// One-line description of how a service last exited.
#[must_use]
pub fn exit_reason_display(reason: ExitReason) -> String {
    match reason {
        ExitReason::Signal(signal) => format!("killed by signal {signal}"),
        ExitReason::ExitCode(code) => format!("exited with {code}"),
    }
}
