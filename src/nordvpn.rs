use crate::model::Country;
use crate::notify::notify;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Dispatch boundary for the external VPN client. Connect and disconnect
/// are intents: nothing about the spawned command's outcome flows back to
/// the caller.
pub trait VpnCli {
    fn is_installed(&self) -> bool;
    fn connect(&self, country: &Country);
    fn disconnect(&self);
}

/// The real `nordvpn` binary, probed once at startup.
pub struct NordCli {
    bin: Option<PathBuf>,
}

impl NordCli {
    pub fn detect(probe_paths: &[PathBuf]) -> Self {
        let bin = probe_paths.iter().find(|path| path.exists()).cloned();
        match &bin {
            Some(path) => info!("nordvpn: using {:?}", path),
            None => warn!("nordvpn: binary not found in {:?}", probe_paths),
        }
        Self { bin }
    }

    /// Spawn `nordvpn <args>` detached. The child is reaped on its own
    /// thread so the picker never waits on it; a failed command is
    /// reported by notification only.
    fn dispatch(&self, args: Vec<String>) {
        let Some(bin) = &self.bin else { return };

        let mut command = Command::new(bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match command.spawn() {
            Ok(mut child) => {
                thread::spawn(move || match child.wait() {
                    Ok(status) if status.success() => {
                        debug!("nordvpn {} finished", args.join(" "));
                    }
                    Ok(status) => {
                        warn!("nordvpn {} exited with {}", args.join(" "), status);
                        notify(
                            "NordVPN command failed",
                            &format!("`nordvpn {}` exited with {}.", args.join(" "), status),
                        );
                    }
                    Err(err) => warn!("waiting on nordvpn: {}", err),
                });
            }
            Err(err) => {
                warn!("spawning {:?}: {}", bin, err);
                notify("NordVPN command failed", &format!("Could not start nordvpn: {err}."));
            }
        }
    }
}

impl VpnCli for NordCli {
    fn is_installed(&self) -> bool {
        self.bin.is_some()
    }

    fn connect(&self, country: &Country) {
        if !self.is_installed() {
            return;
        }
        notify(
            &format!("Connecting to {}...", country.label),
            "Connecting you to NordVPN.",
        );
        self.dispatch(vec!["connect".to_string(), country.id.clone()]);
    }

    fn disconnect(&self) {
        if !self.is_installed() {
            return;
        }
        notify("Disconnecting...", "Disconnecting you from NordVPN.");
        self.dispatch(vec!["disconnect".to_string()]);
    }
}
