//! Per-instance host state behind the `rn_*` imports.
//!
//! This host has no transport: publishing appends to a journal and logs the
//! message. Everything here works on already-decoded arguments, so it is
//! usable without a running guest.

use std::time::Duration;

use crate::config::HostConfig;
use crate::error::HostResult;
use crate::handles::{HandleKind, HandleTable};

#[derive(Debug)]
pub struct ContextRecord;

#[derive(Debug)]
pub struct NodeRecord {
    pub context: u32,
    pub name: String,
}

#[derive(Debug)]
pub struct PublisherRecord {
    pub node: u32,
    pub topic: String,
}

#[derive(Debug, Default)]
pub struct StdMsgString {
    pub data: String,
}

/// One message handed to [`HostState::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub node: String,
    pub topic: String,
    pub data: String,
}

pub struct HostState {
    config: HostConfig,
    default_context: Option<u32>,
    contexts: HandleTable<ContextRecord>,
    nodes: HandleTable<NodeRecord>,
    publishers: HandleTable<PublisherRecord>,
    messages: HandleTable<StdMsgString>,
    journal: Vec<Published>,
    guest_log: Vec<String>,
}

impl HostState {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            default_context: None,
            contexts: HandleTable::new(HandleKind::Context),
            nodes: HandleTable::new(HandleKind::Node),
            publishers: HandleTable::new(HandleKind::Publisher),
            messages: HandleTable::new(HandleKind::StdMsgString),
            journal: Vec::new(),
            guest_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Created on first use; every later call returns the same handle.
    pub fn get_default_context(&mut self) -> u32 {
        match self.default_context {
            Some(handle) => handle,
            None => {
                let handle = self.contexts.insert(ContextRecord);
                log::debug!("created default context {}", handle);
                self.default_context = Some(handle);
                handle
            }
        }
    }

    pub fn create_node(&mut self, context: u32, name: String) -> HostResult<u32> {
        self.contexts.get(context)?;
        log::debug!("creating node '{}' in context {}", name, context);
        Ok(self.nodes.insert(NodeRecord { context, name }))
    }

    pub fn create_publisher(&mut self, node: u32, topic: String) -> HostResult<u32> {
        let node_name = &self.nodes.get(node)?.name;
        log::debug!("creating publisher on '{}' for node '{}'", topic, node_name);
        Ok(self.publishers.insert(PublisherRecord { node, topic }))
    }

    pub fn std_msg_string_default(&mut self) -> u32 {
        self.messages.insert(StdMsgString::default())
    }

    pub fn std_msg_string_set_data(&mut self, message: u32, data: String) -> HostResult<()> {
        self.messages.get_mut(message)?.data = data;
        Ok(())
    }

    pub fn publish(&mut self, publisher: u32, message: u32) -> HostResult<()> {
        let publisher = self.publishers.get(publisher)?;
        let node = self.nodes.get(publisher.node)?;
        let data = self.messages.get(message)?.data.clone();
        log::info!("[{}] {}", publisher.topic, data);
        self.journal.push(Published {
            node: node.name.clone(),
            topic: publisher.topic.clone(),
            data,
        });
        Ok(())
    }

    /// How long a guest sleep of `millis` actually blocks.
    pub fn sleep_duration(&self, millis: u32) -> Duration {
        Duration::from_millis(millis as u64).mul_f64(self.config.time_scale)
    }

    pub fn sleep(&self, millis: u32) {
        let duration = self.sleep_duration(millis);
        log::trace!("guest sleeping {:?}", duration);
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    pub fn guest_log(&mut self, text: String) {
        log::info!(target: "guest", "{}", text);
        self.guest_log.push(text);
    }

    pub fn journal(&self) -> &[Published] {
        &self.journal
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn publisher_count(&self) -> usize {
        self.publishers.len()
    }

    pub fn into_parts(self) -> (Vec<Published>, Vec<String>) {
        (self.journal, self.guest_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;

    fn state() -> HostState {
        HostState::new(HostConfig::default())
    }

    #[test]
    fn default_context_is_shared() {
        let mut state = state();
        let first = state.get_default_context();
        assert_ne!(first, 0);
        assert_eq!(state.get_default_context(), first);
    }

    #[test]
    fn publish_records_node_topic_and_current_data() {
        let mut state = state();
        let context = state.get_default_context();
        let node = state.create_node(context, "talker".into()).unwrap();
        let publisher = state.create_publisher(node, "chatter".into()).unwrap();
        let message = state.std_msg_string_default();

        state.std_msg_string_set_data(message, "one".into()).unwrap();
        state.publish(publisher, message).unwrap();
        state.std_msg_string_set_data(message, "two".into()).unwrap();
        state.publish(publisher, message).unwrap();

        let data: Vec<&str> = state.journal().iter().map(|p| p.data.as_str()).collect();
        assert_eq!(data, ["one", "two"]);
        assert_eq!(state.journal()[0].node, "talker");
        assert_eq!(state.journal()[0].topic, "chatter");
    }

    #[test]
    fn handles_are_checked_per_kind() {
        let mut state = state();
        let context = state.get_default_context();
        let message = state.std_msg_string_default();

        // A message handle is not a node handle.
        let err = state.create_publisher(message, "t".into()).unwrap_err();
        assert!(matches!(
            err,
            HostError::UnknownHandle { kind: HandleKind::Node, handle } if handle == message
        ));

        let err = state.create_node(context + 1, "n".into()).unwrap_err();
        assert!(matches!(err, HostError::UnknownHandle { kind: HandleKind::Context, .. }));

        let err = state.publish(1, message).unwrap_err();
        assert!(matches!(err, HostError::UnknownHandle { kind: HandleKind::Publisher, .. }));
    }

    #[test]
    fn sleep_is_scaled() {
        let mut config = HostConfig::default();
        config.time_scale = 0.5;
        let state = HostState::new(config);
        assert_eq!(state.sleep_duration(1000), Duration::from_millis(500));

        let mut config = HostConfig::default();
        config.time_scale = 0.0;
        assert!(HostState::new(config).sleep_duration(1000).is_zero());
    }
}
