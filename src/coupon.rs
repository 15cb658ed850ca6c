use crate::errors::DownstreamError;
use crate::models::CouponRequest;
use crate::models::coupon::CouponApiResponse;

/// Something that can turn a coupon request into a coupon code.
pub trait CouponIssuer {
    fn issue(
        &self,
        request: &CouponRequest,
    ) -> impl Future<Output = Result<String, DownstreamError>>;
}

/// Coupon service client over HTTP.
pub struct HttpCouponIssuer {
    client: reqwest::Client,
    url: String,
}

impl HttpCouponIssuer {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl CouponIssuer for HttpCouponIssuer {
    async fn issue(&self, request: &CouponRequest) -> Result<String, DownstreamError> {
        log::info!(
            "Coupon API request: campaign={} request={}",
            request.campaign_id,
            request.request_id
        );
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| DownstreamError::Network(e.to_string()))?;

        let status = resp.status();
        log::info!("Coupon API response status: {status}");

        let body: CouponApiResponse = resp
            .json()
            .await
            .map_err(|e| DownstreamError::InvalidResponse(e.to_string()))?;

        if status.is_success() {
            if let Some(code) = body.coupon_code() {
                return Ok(code.to_string());
            }
        }
        Err(DownstreamError::NoCoupon {
            status: status.as_u16(),
            message: body.response_message,
        })
    }
}
