#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use soap_relay::http::{Exchange, InboundResponse, OutboundRequest};
use soap_relay::proxy::{ProxyEndpoint, ProxyRelay};
use soap_relay::soap::DEFAULT_NAMESPACE;

pub const TARGET: &str = "http://isapi.mekashron.com/icu-tech/icutech-test.dll/soap/IICUTech";

/// What the scripted transport does for one attempt.
#[derive(Debug, Clone)]
pub enum Step {
    Respond(u16, String),
    Fail(&'static str),
    Hang,
}

impl Step {
    pub fn respond(status: u16, body: impl Into<String>) -> Self {
        Step::Respond(status, body.into())
    }
}

/// In-memory transport that plays back a script and records requests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExchange {
    steps: Arc<Mutex<VecDeque<Step>>>,
    seen: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl ScriptedExchange {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into())),
            seen: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Exchange for ScriptedExchange {
    async fn execute(&self, request: OutboundRequest) -> anyhow::Result<InboundResponse> {
        self.seen.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step::Respond(status, body)) => Ok(InboundResponse::new(status, body)),
            Some(Step::Fail(reason)) => Err(anyhow::anyhow!(reason)),
            Some(Step::Hang) => std::future::pending().await,
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }
}

pub fn endpoints(count: usize) -> Vec<ProxyEndpoint> {
    (1..=count)
        .map(|i| ProxyEndpoint::from_template(format!("https://proxy{i}.test/?")))
        .collect()
}

pub fn relay(exchange: ScriptedExchange, proxies: usize) -> ProxyRelay<ScriptedExchange> {
    ProxyRelay::new(
        exchange,
        endpoints(proxies),
        url::Url::parse(TARGET).unwrap(),
        DEFAULT_NAMESPACE,
        Duration::from_millis(10_000),
    )
}

pub fn soap_reply(inner: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\
         <SOAP-ENV:Envelope xmlns:SOAP-ENV=\"http://schemas.xmlsoap.org/soap/envelope/\">\
         <SOAP-ENV:Body><NS1:LoginResponse xmlns:NS1=\"urn:ICUTech.Intf-IICUTech\">{inner}\
         </NS1:LoginResponse></SOAP-ENV:Body></SOAP-ENV:Envelope>"
    )
}
