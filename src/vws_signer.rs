use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::vws_constant::VWS_AUTH_SCHEME;

type HmacSha1 = Hmac<Sha1>;

pub struct Signer<'s> {
    access_key: &'s str,
    secret_key: &'s str,
}

impl<'s> Signer<'s> {
    #[inline]
    pub fn new(access_key: &'s str, secret_key: &'s str) -> Self {
        Self {
            access_key,
            secret_key,
        }
    }

    /// Base64 of the raw HMAC-SHA1 digest of `string_to_sign`.
    #[inline]
    pub fn sign(&self, string_to_sign: &str) -> Result<String, InvalidLength> {
        let mut h = HmacSha1::new_from_slice(self.secret_key.as_bytes())?;
        h.update(string_to_sign.as_bytes());
        let msg = h.finalize().into_bytes();
        Ok(STANDARD.encode(msg))
    }

    #[inline]
    pub fn authorization(&self, string_to_sign: &str) -> Result<String, InvalidLength> {
        let sign = self.sign(string_to_sign)?;
        Ok(format!(
            "{scheme} {access_key}:{sign}",
            scheme = VWS_AUTH_SCHEME,
            access_key = self.access_key,
            sign = sign,
        ))
    }
}
