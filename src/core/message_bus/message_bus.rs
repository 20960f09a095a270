//=========================================================================
// Message Bus
//=========================================================================
//
// Per-type message queues shared by the states of one tick and the host.
//
// Lifetime of a message:
// ```text
//   tick N:   clear_all() ─► state A push<M>() ─► state B read<M>()
//                                          └──► frame sink read<M>()
//   tick N+1: clear_all()  (gone)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Message =============================================================

/// Anything that can travel on the [`MessageBus`].
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Producers --------------------------------------------------------

    pub fn push<M: Message>(&mut self, message: M) {
        self.queue_mut::<M>().push(message);
    }

    //--- Consumers --------------------------------------------------------

    /// Messages of type `M` pushed so far this tick, oldest first.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every queued `M`.
    pub fn take<M: Message>(&mut self) -> Vec<M> {
        match self.queues.get_mut(&TypeId::of::<M>()) {
            Some(queue) => queue
                .as_any_mut()
                .downcast_mut::<Vec<M>>()
                .map(std::mem::take)
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map_or(0, Vec::len)
    }

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    //--- Housekeeping -----------------------------------------------------

    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Empties every queue, keeping allocations for the next tick.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        self.queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
            .expect("MessageBus queue stored under the wrong TypeId")
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.queues
                    .values()
                    .filter(|q| q.len() > 0)
                    .map(|q| (q.type_name(), q.len())),
            )
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Score(u32);

    #[derive(Debug, PartialEq)]
    struct Banner(&'static str);

    #[test]
    fn new_bus_reads_empty() {
        let bus = MessageBus::new();
        assert!(bus.read::<Score>().is_empty());
        assert!(!bus.has_messages::<Score>());
    }

    #[test]
    fn queues_are_per_type_and_ordered() {
        let mut bus = MessageBus::new();
        bus.push(Score(1));
        bus.push(Banner("hi"));
        bus.push(Score(2));

        assert_eq!(bus.read::<Score>(), &[Score(1), Score(2)]);
        assert_eq!(bus.read::<Banner>(), &[Banner("hi")]);
        assert_eq!(bus.count::<Score>(), 2);
    }

    #[test]
    fn reading_does_not_consume() {
        let mut bus = MessageBus::new();
        bus.push(Score(9));

        assert_eq!(bus.read::<Score>().len(), 1);
        assert_eq!(bus.read::<Score>().len(), 1);
    }

    #[test]
    fn take_empties_one_queue() {
        let mut bus = MessageBus::new();
        bus.push(Score(3));
        bus.push(Banner("keep"));

        assert_eq!(bus.take::<Score>(), vec![Score(3)]);
        assert!(bus.take::<Score>().is_empty());
        assert_eq!(bus.count::<Banner>(), 1);
    }

    #[test]
    fn clear_all_empties_every_queue() {
        let mut bus = MessageBus::new();
        bus.push(Score(1));
        bus.push(Banner("x"));

        bus.clear_all();
        assert_eq!(bus.count::<Score>(), 0);
        assert_eq!(bus.count::<Banner>(), 0);

        bus.push(Score(4));
        assert_eq!(bus.read::<Score>(), &[Score(4)]);
    }

    #[test]
    fn clear_targets_one_type() {
        let mut bus = MessageBus::new();
        bus.push(Score(1));
        bus.push(Banner("x"));

        bus.clear::<Score>();
        assert!(!bus.has_messages::<Score>());
        assert!(bus.has_messages::<Banner>());
    }

    #[test]
    fn debug_lists_non_empty_queues() {
        let mut bus = MessageBus::new();
        bus.push(Score(1));
        bus.push(Banner("x"));
        bus.clear::<Banner>();

        let text = format!("{:?}", bus);
        assert!(text.contains("Score"));
        assert!(!text.contains("Banner"));
    }
}
