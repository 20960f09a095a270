//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view of a `Vec<M>` so queues of different message types
// can share one map inside the MessageBus.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

pub(super) trait MessageQueue: Send {
    /// Clears the queue, keeping its allocation.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    /// Name of the message type, for diagnostics.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<M>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping(u8);

    #[test]
    fn erased_queue_keeps_capacity_on_clear() {
        let mut queue: Vec<Ping> = (0..32).map(Ping).collect();
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        assert_eq!(erased.len(), 32);
        erased.clear_queue();

        assert!(queue.is_empty());
        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn erased_queue_downcasts_back() {
        let mut queue = vec![Ping(7)];
        let erased: &mut dyn MessageQueue = &mut queue;

        assert!(erased.type_name().ends_with("Ping"));
        let typed = erased.as_any_mut().downcast_mut::<Vec<Ping>>().unwrap();
        typed.push(Ping(8));

        assert_eq!(queue.iter().map(|p| p.0).collect::<Vec<_>>(), vec![7, 8]);
    }
}
