use dispatch_dns_application::use_cases::LookupUseCase;
use dispatch_dns_domain::Config;
use dispatch_dns_infrastructure::dns::StaggeredResolver;
use std::sync::Arc;
#[cfg(feature = "http-relay")]
use tracing::info;

pub fn build_lookup(config: &Config) -> LookupUseCase {
    let race = Arc::new(StaggeredResolver::new(config.resolv.clone()));
    let use_case = LookupUseCase::new(race);

    #[cfg(feature = "http-relay")]
    let use_case = if config.http.remote.is_empty() {
        use_case
    } else {
        use dispatch_dns_infrastructure::dns::HttpRelayResolver;

        info!(remote = %config.http.remote, "HTTP relay enabled");
        use_case.with_relay(Arc::new(HttpRelayResolver::new(
            config.http.clone(),
            config.resolv.timeout(),
        )))
    };

    use_case
}
