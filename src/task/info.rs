//! Instance descriptor as handed over by the scheduler.

use serde::{Deserialize, Serialize};

/// Key/value label attached to a task. A label may carry no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// Port advertised by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub number: u16,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryInfo {
    #[serde(default)]
    pub ports: Vec<Port>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    #[serde(default)]
    pub environment: Vec<EnvVar>,
}

/// Descriptor of a single service instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub task_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub discovery: Option<DiscoveryInfo>,
    #[serde(default)]
    pub command: Option<CommandInfo>,
}

impl TaskInfo {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(Label {
            key: key.into(),
            value: Some(value.into()),
        });
        self
    }

    pub fn with_port(mut self, number: u16) -> Self {
        self.discovery
            .get_or_insert_with(DiscoveryInfo::default)
            .ports
            .push(Port {
                number,
                name: None,
                protocol: Some("tcp".to_string()),
            });
        self
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.command
            .get_or_insert_with(CommandInfo::default)
            .environment
            .push(EnvVar {
                name: name.into(),
                value: value.into(),
            });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let task: TaskInfo = serde_json::from_str(r#"{"task_id": "web.1"}"#).unwrap();
        assert_eq!(task.task_id, "web.1");
        assert!(task.labels.is_empty());
        assert!(task.discovery.is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let task: TaskInfo = serde_json::from_str(
            r#"{
                "task_id": "web.1",
                "name": "web",
                "labels": [{"key": "director", "value": "web-director"}, {"key": "canary"}],
                "discovery": {"ports": [{"number": 31000, "name": "http"}]},
                "command": {"environment": [{"name": "VAAS_INITIAL_WEIGHT", "value": "5"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(task.labels.len(), 2);
        assert_eq!(task.labels[1].value, None);
        assert_eq!(task.discovery.unwrap().ports[0].number, 31000);
        assert_eq!(task.command.unwrap().environment[0].value, "5");
    }
}
