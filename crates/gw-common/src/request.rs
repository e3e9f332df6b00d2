//! Context extracted from an inbound API-gateway proxy event.
//!
//! Only the fields handlers actually read are modelled. Missing or `null`
//! maps deserialize as empty so handlers never branch on absence.

use crate::config::Settings;
use crate::error::{Error, Result};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller identity attached by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub source_ip: Option<String>,
    pub user_agent: Option<String>,
    pub api_key: Option<String>,
    pub api_key_id: Option<String>,
    pub access_key: Option<String>,
}

/// Gateway-supplied request context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub identity: Identity,
    /// Claims the authorizer resolved for the caller.
    #[serde(deserialize_with = "null_as_default")]
    pub authorizer: serde_json::Map<String, serde_json::Value>,
}

/// Inbound proxy event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub resource: Option<String>,
    pub path: Option<String>,
    pub http_method: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub multi_value_headers: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub path_parameters: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub query_string_parameters: BTreeMap<String, String>,
    pub body: Option<String>,
    pub request_context: RequestContext,
}

impl ProxyRequest {
    /// Parse an event from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// IP address of the caller.
    pub fn source_ip(&self) -> Option<&str> {
        self.request_context.identity.source_ip.as_deref()
    }

    /// Caller context resolved by the authorizer.
    pub fn user_context(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.request_context.authorizer
    }

    /// Gateway request id, for log correlation.
    pub fn request_id(&self) -> Option<&str> {
        self.request_context.request_id.as_deref()
    }

    /// The body parsed as a JSON object. An absent or blank body is empty.
    pub fn json_body(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        match self.body.as_deref().map(str::trim) {
            None | Some("") => Ok(serde_json::Map::new()),
            Some(body) => serde_json::from_str(body).map_err(|e| Error::MalformedBody(e.to_string())),
        }
    }

    /// Path parameters, then query-string parameters, then body fields,
    /// merged into one mapping. Later sources win on key clashes.
    pub fn params(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut params: serde_json::Map<String, serde_json::Value> = self
            .path_parameters
            .iter()
            .chain(self.query_string_parameters.iter())
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        params.extend(self.json_body()?);
        Ok(params)
    }

    /// Deserialize the merged parameters into a typed request, ignoring
    /// parameters `T` has no field for.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let params = serde_json::Value::Object(self.params()?);
        serde_json::from_value(params).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Deserialize the merged parameters, handling unknown parameters as
    /// `unknown` says.
    ///
    /// A parameter is known when it appears among the top-level keys `T`
    /// serializes back to, so renamed fields are matched by their wire name.
    pub fn load_with<T>(&self, unknown: UnknownFields) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let params = self.params()?;
        let loaded: T = serde_json::from_value(serde_json::Value::Object(params.clone()))
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;

        if unknown == UnknownFields::Raise {
            let known = serde_json::to_value(&loaded)?;
            if let Some(known) = known.as_object() {
                let extra: Vec<&str> = params
                    .keys()
                    .filter(|k| !known.contains_key(k.as_str()))
                    .map(String::as_str)
                    .collect();
                if !extra.is_empty() {
                    return Err(Error::InvalidRequest(format!(
                        "unknown field(s): {}",
                        extra.join(", ")
                    )));
                }
            }
        }

        Ok(loaded)
    }

    /// [`load_with`](Self::load_with) under the deployment's policy: unknown
    /// parameters are rejected outside production and ignored in it.
    pub fn load_checked<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        self.load_with(UnknownFields::for_settings(Settings::global()))
    }
}

/// What to do with request parameters the target type does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownFields {
    /// Drop them silently.
    Exclude,
    /// Fail with [`Error::InvalidRequest`].
    Raise,
}

impl UnknownFields {
    /// `Exclude` in production, `Raise` everywhere else.
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.is_production() {
            UnknownFields::Exclude
        } else {
            UnknownFields::Raise
        }
    }
}

/// Components of a method ARN handed to a request authorizer, e.g.
/// `arn:aws:execute-api:us-east-1:123:abc/prod/GET/users/42`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodArn {
    pub api_arn: String,
    pub stage: String,
    pub method: String,
    pub path: String,
}

impl MethodArn {
    pub fn parse(method_arn: &str) -> Result<Self> {
        let mut parts = method_arn.split('/');
        let (Some(api_arn), Some(stage), Some(method)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidArgument(format!(
                "method ARN needs api/stage/method segments: {}",
                method_arn
            )));
        };

        Ok(Self {
            api_arn: api_arn.to_string(),
            stage: stage.to_string(),
            method: method.to_string(),
            path: parts.collect::<Vec<_>>().join("/"),
        })
    }
}

impl std::str::FromStr for MethodArn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
