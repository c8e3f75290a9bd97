use chrono::Utc;
use tracing::debug;

use crate::{CounterQueues, CounterStats, CounterTicket, QueueError, QueueType, TicketStatus};

/// First-come first-served ticketing for pharmacy and billing. No capacity limits.
pub struct CounterQueueService;

impl CounterQueueService {
    pub fn book(queues: &mut CounterQueues, queue_type: QueueType, name: &str) -> Result<CounterTicket, QueueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QueueError::ValidationError("Patient name must not be empty".to_string()));
        }

        let queue = queues
            .get_mut(queue_type)
            .ok_or_else(|| QueueError::QueueTypeInvalid(queue_type.to_string()))?;

        queue.last += 1;
        let ticket = CounterTicket {
            id: queue.last,
            name: name.to_string(),
            queue_type,
            status: TicketStatus::Waiting,
            booking_time: Utc::now(),
        };
        queue.tickets.push(ticket.clone());

        debug!("Issued {} ticket {}", queue_type, ticket.id);
        Ok(ticket)
    }

    /// Call the next ticket. Returns the ticket now being served, or `None`
    /// when nobody is left.
    pub fn advance(queues: &mut CounterQueues, queue_type: QueueType) -> Result<Option<CounterTicket>, QueueError> {
        let queue = queues
            .get_mut(queue_type)
            .ok_or_else(|| QueueError::QueueTypeInvalid(queue_type.to_string()))?;

        if queue.current >= queue.last {
            return Ok(None);
        }

        queue.current += 1;
        let current = queue.current;
        let served = queue.tickets.iter_mut().find(|t| t.id == current).map(|ticket| {
            ticket.status = TicketStatus::Completed;
            ticket.clone()
        });

        debug!("{} counter now serving ticket {}", queue_type, current);
        Ok(served)
    }

    pub fn stats(queues: &CounterQueues, queue_type: QueueType) -> Result<CounterStats, QueueError> {
        let queue = queues
            .get(queue_type)
            .ok_or_else(|| QueueError::QueueTypeInvalid(queue_type.to_string()))?;

        Ok(CounterStats {
            queue_type,
            current: queue.current,
            last: queue.last,
            waiting: queue
                .tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Waiting)
                .count(),
            tickets: queue.tickets.clone(),
        })
    }
}
