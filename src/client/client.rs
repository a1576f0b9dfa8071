use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{
    client::{EmulatorOptions, Instance, InstanceData},
    statistics::Statistics,
    util::Result,
};

/// Entry point of the emulator, scoped to one project.
///
/// Instances are created on first use and live as long as the client;
/// asking for the same instance id twice returns handles to the same data.
///
/// ```ignore
/// let client = Client::new("my-project");
/// let table = client.instance("my-instance").table("my-table");
/// table.create([("cf1", GcRule::max_versions(1))])?;
/// ```
pub struct Client {
    project: String,
    options: Arc<EmulatorOptions>,
    stats: Arc<Statistics>,
    instances: Mutex<HashMap<String, Arc<InstanceData>>>,
}

impl Client {
    /// Create a client with default options
    pub fn new(project: impl Into<String>) -> Self {
        Client::build(project.into(), EmulatorOptions::default())
    }

    pub fn with_options(project: impl Into<String>, options: EmulatorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Client::build(project.into(), options))
    }

    fn build(project: String, options: EmulatorOptions) -> Self {
        Client {
            project,
            options: Arc::new(options),
            stats: Arc::new(Statistics::new()),
            instances: Mutex::new(HashMap::new()),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn options(&self) -> &EmulatorOptions {
        &self.options
    }

    /// Statistics shared by every table of this client
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn instance(&self, instance_id: impl Into<String>) -> Instance {
        let instance_id = instance_id.into();
        let data = self
            .instances
            .lock()
            .entry(instance_id.clone())
            .or_insert_with(|| {
                Arc::new(InstanceData::new(
                    self.project.clone(),
                    instance_id,
                    Arc::clone(&self.options),
                    Arc::clone(&self.stats),
                ))
            })
            .clone();
        Instance::new(data)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("project", &self.project)
            .field("options", &self.options)
            .finish()
    }
}
