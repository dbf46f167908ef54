use dispatch_dns_domain::AnswerPolicy;
use hickory_proto::op::ResponseCode;

/// What the race does with one upstream's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A positive answer; publish it.
    Accept,
    /// A negative answer trusted as final; publish it and end the race.
    Definitive,
    /// Discard and let the other upstreams answer.
    Skip,
}

impl Verdict {
    pub fn classify(policy: AnswerPolicy, rcode: ResponseCode) -> Self {
        match (rcode, policy) {
            (ResponseCode::NoError, _) => Verdict::Accept,
            (ResponseCode::ServFail, _) => Verdict::Skip,
            (_, AnswerPolicy::Definitive) => Verdict::Definitive,
            (_, AnswerPolicy::Retry) => Verdict::Skip,
        }
    }

    pub fn publishes(&self) -> bool {
        !matches!(self, Verdict::Skip)
    }
}
