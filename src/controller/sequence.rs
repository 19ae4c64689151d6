/// Monotonic ticket dispenser guarding against overlapping requests.
///
/// Each action takes a ticket before its request goes out; the response
/// is applied only while no newer request has been issued. The form
/// therefore reflects the most recently *issued* action, not whichever
/// response happened to arrive last.
#[derive(Debug, Default)]
pub(crate) struct RequestSequencer {
    last_issued: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

impl RequestSequencer {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.last_issued += 1;
        Ticket(self.last_issued)
    }

    /// True while `ticket` names the newest issued request.
    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.last_issued
    }
}
