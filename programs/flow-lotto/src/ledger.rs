use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use serde::Deserialize;
use tracing::warn;

use crate::{
    amount::parse_ufix64,
    constants::UFIX64_SCALE,
    error::LottoError,
    state::{LifecycleTag, Session, TagEncoding, WalletAddress},
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    pub raw_value: String,
}

/// `SessionInfo` exactly as the contract's read scripts return it: every number
/// is a decimal string, timestamps are UFix64 seconds.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawSessionInfo {
    #[serde(rename = "sessionID", alias = "sessionId")]
    pub session_id: String,
    pub creator: String,
    pub ticket_price: String,
    pub end_time: String,
    pub created_at: String,
    #[serde(alias = "totalPoolAmount")]
    pub total_pool: String,
    #[serde(default)]
    pub total_tickets: Option<String>,
    #[serde(default)]
    pub participant_tickets: BTreeMap<String, String>,
    pub state: RawState,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub closer: Option<String>,
    #[serde(default)]
    pub prizes_distributed: bool,
}

impl RawSessionInfo {
    pub fn into_session(self, encoding: TagEncoding) -> Result<Session> {
        let session_id = parse_integer(&self.session_id)?;

        let mut participant_tickets = BTreeMap::new();
        for (wallet, count) in &self.participant_tickets {
            participant_tickets.insert(WalletAddress::new(wallet), parse_integer(count)?);
        }

        let tag = self
            .state
            .raw_value
            .trim()
            .parse::<u8>()
            .map_err(|_| LottoError::MalformedLedgerData)?;

        let session = Session {
            session_id,
            creator: WalletAddress::new(&self.creator),
            ticket_price: parse_ufix64(&self.ticket_price)?,
            created_at: parse_timestamp(&self.created_at)?,
            end_time: parse_timestamp(&self.end_time)?,
            participant_tickets,
            total_pool: parse_ufix64(&self.total_pool)?,
            lifecycle_tag: LifecycleTag::new(tag, encoding),
            winner: non_empty(self.winner.as_deref()),
            closer: non_empty(self.closer.as_deref()),
            prizes_distributed: self.prizes_distributed,
        };

        session.validate()?;

        if let Some(reported) = self.total_tickets.as_deref() {
            let reported = parse_integer(reported)?;
            if reported != session.total_tickets() {
                warn!(
                    session_id,
                    reported,
                    counted = session.total_tickets(),
                    "ticket total disagrees with participant map"
                );
                return err!(LottoError::PoolMismatch);
            }
        }

        Ok(session)
    }
}

/// Decodes the JSON array returned by the "all sessions" script.
pub fn decode_sessions(json: &str, encoding: TagEncoding) -> Result<Vec<Session>> {
    let raw: Vec<RawSessionInfo> = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "session list is not valid ledger JSON");
        LottoError::MalformedLedgerData
    })?;
    raw.into_iter().map(|s| s.into_session(encoding)).collect()
}

/// Decodes a single-session script result; `null` means the session does not exist.
pub fn decode_session(json: &str, encoding: TagEncoding) -> Result<Option<Session>> {
    let raw: Option<RawSessionInfo> = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "session is not valid ledger JSON");
        LottoError::MalformedLedgerData
    })?;
    raw.map(|s| s.into_session(encoding)).transpose()
}

fn parse_integer(raw: &str) -> Result<u64> {
    Ok(raw
        .trim()
        .parse::<u64>()
        .map_err(|_| LottoError::MalformedLedgerData)?)
}

fn parse_timestamp(raw: &str) -> Result<i64> {
    let seconds = parse_ufix64(raw)? / UFIX64_SCALE;
    Ok(i64::try_from(seconds).map_err(|_| LottoError::Overflow)?)
}

fn non_empty(raw: Option<&str>) -> Option<WalletAddress> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(WalletAddress::new)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::state::SessionState;

    fn raw() -> serde_json::Value {
        json!({
            "sessionID": "12",
            "creator": "0xF8D6E0586B0A20C7",
            "ticketPrice": "1.00000000",
            "endTime": "1700086400.00000000",
            "createdAt": "1700000000.00000000",
            "isEnded": false,
            "isActive": true,
            "totalPool": "4.00000000",
            "totalTickets": "4",
            "participantTickets": { "0x01cf0e2f2f715450": "3", "0x179b6b1cb6755e31": "1" },
            "state": { "rawValue": "0" },
            "winner": null,
            "prizesDistributed": false
        })
    }

    #[test]
    fn decodes_the_script_shape() {
        let session = serde_json::from_value::<RawSessionInfo>(raw())
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .unwrap();

        assert_eq!(session.session_id, 12);
        assert_eq!(session.creator, WalletAddress::new("0xf8d6e0586b0a20c7"));
        assert_eq!(session.ticket_price, 100_000_000);
        assert_eq!(session.created_at, 1_700_000_000);
        assert_eq!(session.end_time, 1_700_086_400);
        assert_eq!(session.total_pool, 400_000_000);
        assert_eq!(session.tickets_of(&WalletAddress::new("0x01CF0E2F2F715450")), 3);
        assert_eq!(session.lifecycle_tag.decode(), SessionState::Active);
        assert_eq!(session.winner, None);
        assert_eq!(session.closer, None);
    }

    #[test]
    fn accepts_older_field_names() {
        let mut value = raw();
        let obj = value.as_object_mut().unwrap();
        let pool = obj.remove("totalPool").unwrap();
        obj.insert("totalPoolAmount".into(), pool);
        let id = obj.remove("sessionID").unwrap();
        obj.insert("sessionId".into(), id);
        obj.remove("totalTickets");
        obj.remove("prizesDistributed");

        let session = serde_json::from_value::<RawSessionInfo>(value)
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .unwrap();
        assert_eq!(session.total_pool, 400_000_000);
        assert!(!session.prizes_distributed);
    }

    #[test]
    fn rejects_inconsistent_records() {
        let mut value = raw();
        value["totalPool"] = json!("5.00000000");
        assert!(serde_json::from_value::<RawSessionInfo>(value)
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .is_err());

        let mut value = raw();
        value["totalTickets"] = json!("5");
        assert!(serde_json::from_value::<RawSessionInfo>(value)
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .is_err());

        let mut value = raw();
        value["ticketPrice"] = json!("-1.0");
        assert!(serde_json::from_value::<RawSessionInfo>(value)
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .is_err());
    }

    #[test]
    fn oversized_ticket_counts_are_rejected_not_summed() {
        let mut value = raw();
        value["participantTickets"] = json!({
            "0xa1": "18446744073709551615",
            "0xb2": "1"
        });
        value["totalTickets"] = json!("1");
        let list = json!([value]).to_string();

        let res = decode_sessions(&list, TagEncoding::FiveState);
        let code = match res.unwrap_err() {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(code, u32::from(LottoError::TicketCountOutOfRange));
    }

    #[test]
    fn decodes_lists_and_missing_sessions() {
        let list = json!([raw(), raw()]).to_string();
        assert_eq!(decode_sessions(&list, TagEncoding::FiveState).unwrap().len(), 2);
        assert!(decode_sessions("[]", TagEncoding::FiveState).unwrap().is_empty());
        assert!(decode_sessions("{", TagEncoding::FiveState).is_err());
        assert_eq!(decode_session("null", TagEncoding::FiveState).unwrap(), None);
    }

    #[test]
    fn out_of_range_tag_survives_decoding() {
        let mut value = raw();
        value["state"] = json!({ "rawValue": "9" });
        let session = serde_json::from_value::<RawSessionInfo>(value)
            .unwrap()
            .into_session(TagEncoding::FiveState)
            .unwrap();
        assert_eq!(session.lifecycle_tag.decode(), SessionState::Unknown(9));
    }
}
