use crate::cli::KubeprodCli;
use crate::error::{Error, Result};
use crate::installer::{InstallOptions, Installer, InstallerFactory, PlatformConfig};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Pins `EMAIL` for the lifetime of the guard so flag defaults are predictable.
pub struct EmailEnvGuard {
    _lock: MutexGuard<'static, ()>,
    prev: Option<OsString>,
}

impl EmailEnvGuard {
    pub fn set(value: Option<&str>) -> Self {
        let lock = lock_env();
        let prev = env::var_os("EMAIL");
        match value {
            Some(v) => env::set_var("EMAIL", v),
            None => env::remove_var("EMAIL"),
        }
        Self { _lock: lock, prev }
    }
}

impl Drop for EmailEnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(val) => env::set_var("EMAIL", val),
            None => env::remove_var("EMAIL"),
        }
    }
}

/// Parses `kubeprod <args..>` with `EMAIL` pinned to `email`.
pub fn parse(args: &[&str], email: Option<&str>) -> Result<KubeprodCli> {
    let _env = EmailEnvGuard::set(email);
    KubeprodCli::try_parse_from(std::iter::once("kubeprod").chain(args.iter().copied()))
}

#[derive(Debug, Default)]
pub struct Calls {
    pub constructed: Cell<usize>,
    pub runs: Cell<usize>,
    pub platform: RefCell<Option<String>>,
    pub options: RefCell<Option<InstallOptions>>,
    pub config: RefCell<Option<Value>>,
}

/// Factory double recording what the registrar hands it.
pub struct RecordingFactory {
    pub calls: Rc<Calls>,
    fail_with: RefCell<Option<Error>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self { calls: Rc::new(Calls::default()), fail_with: RefCell::new(None) }
    }

    pub fn failing(err: Error) -> Self {
        Self { calls: Rc::new(Calls::default()), fail_with: RefCell::new(Some(err)) }
    }
}

impl InstallerFactory for RecordingFactory {
    fn new_install_subcommand(
        &self,
        options: &InstallOptions,
        platform: &str,
        config: Box<dyn PlatformConfig>,
    ) -> Result<Box<dyn Installer>> {
        self.calls.constructed.set(self.calls.constructed.get() + 1);
        *self.calls.platform.borrow_mut() = Some(platform.to_string());
        *self.calls.options.borrow_mut() = Some(options.clone());
        *self.calls.config.borrow_mut() = Some(config.to_value()?);
        if let Some(err) = self.fail_with.borrow_mut().take() {
            return Err(err);
        }
        Ok(Box::new(RecordingInstaller { calls: Rc::clone(&self.calls) }))
    }
}

struct RecordingInstaller {
    calls: Rc<Calls>,
}

impl Installer for RecordingInstaller {
    fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        self.calls.runs.set(self.calls.runs.get() + 1);
        writeln!(out, "installer ran")?;
        Ok(())
    }
}
