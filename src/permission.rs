use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use crate::common::PermissionStatus;
use crate::config::PermissionConfig;

/// Desktop notification permission, as the host platform would expose it.
pub trait PermissionGateway: Send + Sync {
    fn query(&self) -> PermissionStatus;

    /// Prompt the user. Resolves to `Granted` or `Denied`.
    fn request(&self) -> impl Future<Output = PermissionStatus> + Send;
}

/// Answers the prompt after a fixed delay with a preconfigured decision.
#[derive(Debug)]
pub struct SimulatedPermissionGateway {
    status: Mutex<PermissionStatus>,
    grant: bool,
    delay: Duration,
}

impl SimulatedPermissionGateway {
    pub fn new(grant: bool, delay: Duration) -> Self {
        Self {
            status: Mutex::new(PermissionStatus::Default),
            grant,
            delay,
        }
    }

    pub fn from_config(config: &PermissionConfig) -> Self {
        Self::new(config.grant, Duration::from_millis(config.delay_ms))
    }

    fn current(&self) -> PermissionStatus {
        match self.status.lock() {
            Ok(guard) => *guard,
            Err(poison) => *poison.into_inner(),
        }
    }

    fn store(&self, status: PermissionStatus) {
        match self.status.lock() {
            Ok(mut guard) => *guard = status,
            Err(poison) => *poison.into_inner() = status,
        }
    }
}

impl PermissionGateway for SimulatedPermissionGateway {
    fn query(&self) -> PermissionStatus {
        self.current()
    }

    async fn request(&self) -> PermissionStatus {
        // The platform only prompts once; later requests echo the stored answer.
        let current = self.current();
        if current != PermissionStatus::Default {
            return current;
        }

        tokio::time::sleep(self.delay).await;
        let decided = if self.grant {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.store(decided);
        log::info!("Notification permission answered: {decided:?}");
        decided
    }
}
