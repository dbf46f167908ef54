use async_trait::async_trait;
use dispatch_dns_application::ports::UpstreamResolver;
use dispatch_dns_domain::{DomainError, TransportMode};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};
use std::str::FromStr;
use std::sync::Mutex;

pub fn build_query(name: &str, id: u16) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(name).unwrap(), RecordType::A));
    message
}

pub fn answer_for(query: &Message, rcode: ResponseCode) -> Message {
    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_response_code(rcode)
        .add_queries(query.queries().to_vec());
    response
}

/// Records every call and replays a scripted outcome.
pub struct MockUpstreamResolver {
    name: &'static str,
    outcome: Mutex<Result<ResponseCode, DomainError>>,
    calls: Mutex<Vec<(TransportMode, u16)>>,
}

impl MockUpstreamResolver {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            outcome: Mutex::new(Ok(ResponseCode::NoError)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_with(self, rcode: ResponseCode) -> Self {
        *self.outcome.lock().unwrap() = Ok(rcode);
        self
    }

    pub fn fail_with(self, error: DomainError) -> Self {
        *self.outcome.lock().unwrap() = Err(error);
        self
    }

    pub fn calls(&self) -> Vec<(TransportMode, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn lookup(
        &self,
        transport: TransportMode,
        query: &Message,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push((transport, query.id()));
        let outcome = self.outcome.lock().unwrap().clone();
        outcome.map(|rcode| answer_for(query, rcode))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
