use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{string_list, Resource, ResourceType};
use crate::section::*;

const HTTP_VERSION: &str = "http2";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    AllowAll,
    HttpsOnly,
    #[default]
    RedirectToHttps,
}

impl fmt::Display for ViewerProtocolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewerProtocolPolicy::AllowAll => "allow-all",
            ViewerProtocolPolicy::HttpsOnly => "https-only",
            ViewerProtocolPolicy::RedirectToHttps => "redirect-to-https",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OriginProtocolPolicy {
    #[default]
    HttpOnly,
    MatchViewer,
    HttpsOnly,
}

impl fmt::Display for OriginProtocolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OriginProtocolPolicy::HttpOnly => "http-only",
            OriginProtocolPolicy::MatchViewer => "match-viewer",
            OriginProtocolPolicy::HttpsOnly => "https-only",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslSupportMethod {
    SniOnly,
    Vip,
}

impl fmt::Display for SslSupportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SslSupportMethod::SniOnly => "sni-only",
            SslSupportMethod::Vip => "vip",
        };
        f.write_str(name)
    }
}

/// A custom origin; the protocol policy towards it defaults to `http-only`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Origin {
    pub id: String,
    pub domain_name: String,
    #[serde(default)]
    pub protocol_policy: OriginProtocolPolicy,
}

impl Origin {
    pub fn new(id: impl Into<String>, domain_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            domain_name: domain_name.into(),
            protocol_policy: OriginProtocolPolicy::default(),
        }
    }
}

impl Delegating for Origin {
    fn delegate(&self) -> Section {
        aggregating(vec![
            titled(
                "CustomOriginConfig",
                vec![single_line("OriginProtocolPolicy", self.protocol_policy)],
            ),
            single_line("DomainName", &self.domain_name),
            single_line("Id", &self.id),
        ])
    }
}

/// Page served in place of an origin error
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorResponse {
    pub error_code: u16,
    pub response_page_path: String,
    pub response_code: u16,
}

impl ErrorResponse {
    pub fn new(error_code: u16, response_page_path: impl Into<String>, response_code: u16) -> Self {
        Self {
            error_code,
            response_page_path: response_page_path.into(),
            response_code,
        }
    }
}

impl Delegating for ErrorResponse {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("ErrorCode", self.error_code),
            single_line("ResponsePagePath", &self.response_page_path),
            single_line("ResponseCode", self.response_code),
        ])
    }
}

/// TLS certificate presented to viewers, selected by `source`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ViewerCertificate {
    Acm {
        certificate_arn: String,
        ssl_support_method: SslSupportMethod,
    },
    CloudfrontDefault,
}

impl Delegating for ViewerCertificate {
    fn delegate(&self) -> Section {
        match self {
            ViewerCertificate::Acm {
                certificate_arn,
                ssl_support_method,
            } => aggregating(vec![
                single_line("AcmCertificateArn", certificate_arn),
                single_line("SslSupportMethod", ssl_support_method),
            ]),
            ViewerCertificate::CloudfrontDefault => {
                single_line("CloudFrontDefaultCertificate", true)
            }
        }
    }
}

/// CloudFront distribution over one or more custom origins
///
/// Deployments differ in what they need here, so only the parts every
/// distribution shares are fixed: HTTP/2, enabled, and a default cache
/// behavior that does not forward query strings. Aliases and the viewer
/// certificate are emitted only when configured, and the viewer protocol
/// policy defaults to `redirect-to-https`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudFrontDistribution {
    resource_id: String,
    aliases: Vec<String>,
    origins: Vec<Origin>,
    error_responses: Vec<ErrorResponse>,
    default_root_object: Option<String>,
    target_origin_id: String,
    viewer_protocol_policy: ViewerProtocolPolicy,
    viewer_certificate: Option<ViewerCertificate>,
}

impl CloudFrontDistribution {
    pub fn builder() -> CloudFrontDistributionBuilder {
        CloudFrontDistributionBuilder::default()
    }

    fn default_cache_behavior(&self) -> Section {
        titled(
            "DefaultCacheBehavior",
            vec![
                titled("ForwardedValues", vec![single_line("QueryString", false)]),
                single_line("TargetOriginId", &self.target_origin_id),
                single_line("ViewerProtocolPolicy", self.viewer_protocol_policy),
            ],
        )
    }
}

impl Resource for CloudFrontDistribution {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::CloudFrontDistribution
    }

    fn properties(&self) -> Section {
        let error_responses = (!self.error_responses.is_empty()).then(|| {
            titled(
                "CustomErrorResponses",
                vec![list_of(
                    self.error_responses
                        .iter()
                        .cloned()
                        .map(IntoSection::into_section),
                )],
            )
        });

        titled(
            "DistributionConfig",
            vec![aggregating_present([
                string_list("Aliases", &self.aliases),
                Some(titled(
                    "Origins",
                    vec![list_of(self.origins.iter().cloned().map(IntoSection::into_section))],
                )),
                error_responses,
                Some(self.default_cache_behavior()),
                self.default_root_object
                    .as_ref()
                    .map(|object| single_line("DefaultRootObject", object)),
                Some(single_line("HttpVersion", HTTP_VERSION)),
                Some(single_line("Enabled", true)),
                self.viewer_certificate
                    .clone()
                    .map(|certificate| titled_one("ViewerCertificate", certificate.into_section())),
            ])],
        )
    }
}

/// Builder for [`CloudFrontDistribution`]
///
/// Defaults:
/// - viewers are redirected to HTTPS (`redirect-to-https`)
/// - origins are reached over `http-only` unless an origin says otherwise
/// - `HttpVersion: http2` and `Enabled: true` are always emitted
/// - query strings are not forwarded to the origin
/// - `Aliases` and `ViewerCertificate` are omitted unless set; aliases need
///   an ACM certificate
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloudFrontDistributionBuilder {
    resource_id: Option<String>,
    aliases: Vec<String>,
    origins: Vec<Origin>,
    error_responses: Vec<ErrorResponse>,
    default_root_object: Option<String>,
    target_origin_id: Option<String>,
    viewer_protocol_policy: ViewerProtocolPolicy,
    viewer_certificate: Option<ViewerCertificate>,
}

impl CloudFrontDistributionBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Alternate domain name; requires an ACM viewer certificate.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.origins.push(origin);
        self
    }

    pub fn error_response(mut self, response: ErrorResponse) -> Self {
        self.error_responses.push(response);
        self
    }

    pub fn default_root_object(mut self, object: impl Into<String>) -> Self {
        self.default_root_object = Some(object.into());
        self
    }

    /// Origin the default cache behavior routes to; must name a configured origin.
    pub fn target_origin_id(mut self, origin_id: impl Into<String>) -> Self {
        self.target_origin_id = Some(origin_id.into());
        self
    }

    pub fn viewer_protocol_policy(mut self, policy: ViewerProtocolPolicy) -> Self {
        self.viewer_protocol_policy = policy;
        self
    }

    pub fn viewer_certificate(mut self, certificate: ViewerCertificate) -> Self {
        self.viewer_certificate = Some(certificate);
        self
    }

    pub fn build(self) -> Result<CloudFrontDistribution> {
        const ENTRY: &str = "CloudFrontDistribution";

        if self.origins.is_empty() {
            return Err(Error::missing(ENTRY, "origins"));
        }
        let mut origin_ids = HashSet::new();
        for origin in &self.origins {
            if !origin_ids.insert(origin.id.as_str()) {
                return Err(Error::constraint(
                    ENTRY,
                    format!("duplicate origin id `{}`", origin.id),
                ));
            }
        }

        let target_origin_id = required(self.target_origin_id, ENTRY, "target_origin_id")?;
        if !origin_ids.contains(target_origin_id.as_str()) {
            return Err(Error::constraint(
                ENTRY,
                format!("target_origin_id `{}` does not name an origin", target_origin_id),
            ));
        }

        let has_acm_certificate = matches!(self.viewer_certificate, Some(ViewerCertificate::Acm { .. }));
        if !self.aliases.is_empty() && !has_acm_certificate {
            return Err(Error::constraint(
                ENTRY,
                "aliases require an ACM viewer certificate",
            ));
        }

        Ok(CloudFrontDistribution {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            aliases: self.aliases,
            origins: self.origins,
            error_responses: self.error_responses,
            default_root_object: self.default_root_object,
            target_origin_id,
            viewer_protocol_policy: self.viewer_protocol_policy,
            viewer_certificate: self.viewer_certificate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> CloudFrontDistributionBuilder {
        CloudFrontDistribution::builder()
            .resource_id("Site")
            .origin(Origin::new("WebBucket", "web.s3-website.eu-west-1.amazonaws.com"))
            .target_origin_id("WebBucket")
    }

    #[test]
    fn test_minimal_distribution() {
        let distribution = site().build().unwrap();

        let expected = "\
Site:
  Type: AWS::CloudFront::Distribution
  Properties:
    DistributionConfig:
      Origins:
        - CustomOriginConfig:
            OriginProtocolPolicy: http-only
          DomainName: web.s3-website.eu-west-1.amazonaws.com
          Id: WebBucket
      DefaultCacheBehavior:
        ForwardedValues:
          QueryString: false
        TargetOriginId: WebBucket
        ViewerProtocolPolicy: redirect-to-https
      HttpVersion: http2
      Enabled: true";
        assert_eq!(distribution.render(), expected);
    }

    #[test]
    fn test_distribution_with_aliases_and_certificate() {
        let distribution = site()
            .alias("www.example.com")
            .error_response(ErrorResponse::new(404, "/index.html", 200))
            .default_root_object("index.html")
            .viewer_protocol_policy(ViewerProtocolPolicy::HttpsOnly)
            .viewer_certificate(ViewerCertificate::Acm {
                certificate_arn: "arn:aws:acm:us-east-1:123456789012:certificate/site".to_string(),
                ssl_support_method: SslSupportMethod::SniOnly,
            })
            .build()
            .unwrap();

        let rendered = distribution.render();
        assert!(rendered.contains("    DistributionConfig:\n      Aliases:\n        - www.example.com\n      Origins:\n"));
        assert!(rendered.contains(
            "      CustomErrorResponses:\n        - ErrorCode: 404\n          ResponsePagePath: /index.html\n          ResponseCode: 200\n"
        ));
        assert!(rendered.contains("        ViewerProtocolPolicy: https-only\n      DefaultRootObject: index.html\n"));
        assert!(rendered.ends_with(
            "      Enabled: true\n      ViewerCertificate:\n        AcmCertificateArn: arn:aws:acm:us-east-1:123456789012:certificate/site\n        SslSupportMethod: sni-only"
        ));
    }

    #[test]
    fn test_default_certificate() {
        let distribution = site()
            .viewer_certificate(ViewerCertificate::CloudfrontDefault)
            .build()
            .unwrap();
        assert!(distribution
            .render()
            .ends_with("      ViewerCertificate:\n        CloudFrontDefaultCertificate: true"));
    }

    #[test]
    fn test_aliases_need_acm_certificate() {
        let err = site()
            .alias("www.example.com")
            .viewer_certificate(ViewerCertificate::CloudfrontDefault)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "CloudFrontDistribution: aliases require an ACM viewer certificate"
        );
    }

    #[test]
    fn test_target_origin_must_exist() {
        let err = site().target_origin_id("Api").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "CloudFrontDistribution: target_origin_id `Api` does not name an origin"
        );
    }

    #[test]
    fn test_origins_required_and_unique() {
        let err = CloudFrontDistribution::builder()
            .resource_id("Site")
            .target_origin_id("WebBucket")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "origins", .. }));

        let err = site()
            .origin(Origin::new("WebBucket", "other.example.com"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate origin id `WebBucket`"));
    }
}
