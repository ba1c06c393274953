use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use astra::Request;
use serde::Deserialize;
use serde_json::json;

use crate::catalog;
use crate::domain::{Constraints, DealStyle, Quality, UserPrefs};
use crate::engine::{coach, draft, swipe, RandomPicker};
use crate::errors::ServerError;
use crate::estimator::Estimator;
use crate::responses::{html_response, json_response, redirect_response, ResultResp};
use crate::state::Store;
use crate::templates::pages::chat::ChatPageVm;
use crate::templates::pages::swipe::SwipePageVm;
use crate::templates::pages::{
    chat_page, messages_page, prefs_page, swipe_page, watchlist_page,
};

pub fn handle(req: Request, store: &Store) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => browse(store),
        ("POST", "/swipe") => swipe_action(req, store),

        ("GET", "/watchlist") => watchlist(store),
        ("POST", "/watchlist/remove") => watchlist_remove(req, store),

        ("GET", "/messages") => messages(store),
        ("GET", "/chat") => chat(&req, store),
        ("POST", "/chat/send") => chat_send(req, store),
        ("POST", "/chat/delete") => chat_delete(req, store),

        ("GET", "/prefs") => prefs_form(&req, store),
        ("POST", "/prefs") => prefs_save(req, store),

        ("POST", "/api/create-csv") => create_csv(req, store),
        ("GET", "/api/estimate") => estimate(&req, store),

        ("GET", "/static/main.css") => stylesheet(),

        _ => Err(ServerError::NotFound),
    }
}

// ---------- pages ----------

fn browse(store: &Store) -> ResultResp {
    let markup = store.with_state(|state| {
        let listing = state.current_listing().cloned();
        let report = listing
            .as_ref()
            .map(|l| swipe::evaluate(l, &state.prefs, &state.constraints));

        Ok(swipe_page(&SwipePageVm {
            listing: listing.as_ref(),
            report,
            position: state.cursor + 1,
            total: state.listings.len(),
            watch_count: state.watchlist.len(),
        }))
    })?;

    html_response(markup)
}

fn swipe_action(req: Request, store: &Store) -> ResultResp {
    let form = read_form(req)?;
    let action = form
        .get("action")
        .ok_or_else(|| ServerError::BadRequest("missing action".into()))?;

    store.with_state(|state| {
        match action.as_str() {
            "right" => {
                if let Some(listing_id) = form.get("listing") {
                    state.add_to_watchlist(listing_id);
                }
                state.advance_cursor();
            }
            "left" => state.advance_cursor(),
            "restart" => state.restart_deck(),
            other => {
                return Err(ServerError::BadRequest(format!("unknown action: {other}")))
            }
        }
        Ok(())
    })?;

    redirect_response("/")
}

fn watchlist(store: &Store) -> ResultResp {
    let markup = store.with_state(|state| {
        let saved = state.watchlisted();
        Ok(watchlist_page(&saved))
    })?;

    html_response(markup)
}

fn watchlist_remove(req: Request, store: &Store) -> ResultResp {
    let form = read_form(req)?;
    let listing_id = form
        .get("listing")
        .ok_or_else(|| ServerError::BadRequest("missing listing".into()))?;

    store.with_state(|state| {
        state.remove_from_watchlist(listing_id);
        Ok(())
    })?;

    redirect_response("/watchlist")
}

fn messages(store: &Store) -> ResultResp {
    let markup = store.with_state(|state| {
        let mut recent: Vec<_> = state.conversations.iter().collect();
        recent.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));

        let threads: Vec<(String, String, String)> = recent
            .iter()
            .map(|c| {
                let title = state
                    .listing(&c.listing_id)
                    .map(|l| l.title.clone())
                    .unwrap_or_else(|| c.listing_id.clone());
                let preview = c
                    .messages
                    .last()
                    .map(|m| truncate(&m.text, 60))
                    .unwrap_or_default();
                (c.id.clone(), title, preview)
            })
            .collect();

        Ok(messages_page(&threads, state.watchlist.len()))
    })?;

    html_response(markup)
}

/// `/chat?listing=<id>` opens (or resumes) the thread for a listing;
/// `/chat?conversation=<id>` renders an existing thread.
fn chat(req: &Request, store: &Store) -> ResultResp {
    let params = parse_query(req);

    let conversation_id = match (params.get("conversation"), params.get("listing")) {
        (Some(id), _) => id.clone(),
        (None, Some(listing_id)) => {
            store.with_state(|state| state.start_conversation(listing_id, &RandomPicker))?
        }
        (None, None) => return redirect_response("/messages"),
    };

    let markup = store.with_state(|state| {
        let conversation = state
            .conversation(&conversation_id)
            .ok_or(ServerError::NotFound)?
            .clone();
        let listing = state
            .listing(&conversation.listing_id)
            .ok_or(ServerError::NotFound)?
            .clone();

        let coaching = coach::suggest(&listing, &conversation.messages);
        let draft = draft::draft(&listing, &state.prefs, &conversation.messages);

        let threads: Vec<(String, String)> = state
            .conversations
            .iter()
            .map(|c| {
                let title = state
                    .listing(&c.listing_id)
                    .map(|l| l.title.clone())
                    .unwrap_or_else(|| c.listing_id.clone());
                (c.id.clone(), title)
            })
            .collect();

        Ok(chat_page(&ChatPageVm {
            listing: &listing,
            conversation: &conversation,
            coaching,
            draft,
            threads,
            watch_count: state.watchlist.len(),
        }))
    })?;

    html_response(markup)
}

fn chat_send(req: Request, store: &Store) -> ResultResp {
    let form = read_form(req)?;
    let conversation_id = form
        .get("conversation")
        .ok_or_else(|| ServerError::BadRequest("missing conversation".into()))?
        .clone();
    let text = form
        .get("text")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("empty message".into()))?;

    store.with_state(|state| state.send_buyer_message(&conversation_id, &text, &RandomPicker))?;

    redirect_response(&format!("/chat?conversation={conversation_id}"))
}

fn chat_delete(req: Request, store: &Store) -> ResultResp {
    let form = read_form(req)?;
    let conversation_id = form
        .get("conversation")
        .ok_or_else(|| ServerError::BadRequest("missing conversation".into()))?;

    store.with_state(|state| {
        state.delete_conversation(conversation_id);
        Ok(())
    })?;

    redirect_response("/messages")
}

fn prefs_form(req: &Request, store: &Store) -> ResultResp {
    let saved = parse_query(req).contains_key("saved");

    let markup = store.with_state(|state| {
        Ok(prefs_page(
            &state.prefs,
            &state.constraints,
            state.watchlist.len(),
            saved,
        ))
    })?;

    html_response(markup)
}

fn prefs_save(req: Request, store: &Store) -> ResultResp {
    let form = read_form(req)?;

    let max_price = form
        .get("max_price")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| ServerError::BadRequest(format!("bad max_price: {v}")))
        })
        .transpose()?;

    let min_quality = form
        .get("min_quality")
        .and_then(|v| Quality::from_label(v));

    let preferred_locations: Vec<String> = form
        .get("locations")
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let deal_style = form.get("deal_style").and_then(|v| DealStyle::from_label(v));
    let must_have_images = form.contains_key("must_have_images");

    store.with_state(|state| {
        state.prefs = UserPrefs {
            max_price,
            min_quality,
            preferred_locations,
            deal_style,
        };
        state.constraints = Constraints { must_have_images };
        Ok(())
    })?;

    redirect_response("/prefs?saved=1")
}

// ---------- API ----------

#[derive(Deserialize)]
struct CreateCsvRequest {
    filename: String,
    content: String,
}

/// Counterpart of the scraper's upload hook: writes the snapshot under
/// search-results/ and folds any new listings straight into the catalog.
fn create_csv(req: Request, store: &Store) -> ResultResp {
    let body = read_body(req)?;

    let payload: CreateCsvRequest = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            return json_response(500, &json!({ "success": false, "error": e.to_string() }));
        }
    };

    if !is_safe_csv_filename(&payload.filename) {
        return json_response(
            400,
            &json!({ "success": false, "error": "filename must be a bare .csv name" }),
        );
    }

    let dir = Path::new("search-results");
    if let Err(e) = std::fs::create_dir_all(dir) {
        return json_response(500, &json!({ "success": false, "error": e.to_string() }));
    }
    let file_path = dir.join(&payload.filename);
    if let Err(e) = std::fs::write(&file_path, &payload.content) {
        return json_response(500, &json!({ "success": false, "error": e.to_string() }));
    }

    let parsed = catalog::parse_listings_csv(&payload.content);
    let added = store.with_state(|state| {
        let mut added = 0;
        for listing in parsed {
            if state.listing(&listing.id).is_none() {
                state.listings.push(listing);
                added += 1;
            }
        }
        Ok(added)
    })?;

    println!("📄 Snapshot {} saved ({added} new listings)", payload.filename);

    json_response(
        200,
        &json!({
            "success": true,
            "message": format!("CSV file created: {}", payload.filename),
            "path": file_path.to_string_lossy(),
        }),
    )
}

fn estimate(req: &Request, store: &Store) -> ResultResp {
    let params = parse_query(req);
    let listing_id = params
        .get("listing")
        .ok_or_else(|| ServerError::BadRequest("missing listing".into()))?;

    let listing = store.with_state(|state| {
        state
            .listing(listing_id)
            .cloned()
            .ok_or(ServerError::NotFound)
    })?;

    let estimator = match Estimator::from_env() {
        Ok(e) => e,
        Err(e) => {
            return json_response(502, &json!({ "success": false, "error": e.to_string() }))
        }
    };

    match estimator.estimate(&listing) {
        Ok(estimate) => json_response(200, &estimate),
        Err(e) => json_response(502, &json!({ "success": false, "error": e.to_string() })),
    }
}

fn stylesheet() -> ResultResp {
    let resp = astra::ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/css; charset=utf-8")
        .body(astra::Body::from(
            include_str!("../static/main.css").to_string(),
        ))
        .map_err(|_| ServerError::InternalError)?;
    Ok(resp)
}

// ---------- request plumbing ----------

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(parse_urlencoded)
        .unwrap_or_default()
}

fn read_body(req: Request) -> Result<String, ServerError> {
    let mut body = String::new();
    req.into_body()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(body)
}

fn read_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    Ok(parse_urlencoded(&read_body(req)?))
}

fn parse_urlencoded(input: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for pair in input.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(k), Some(v)) = (parts.next(), parts.next()) {
            map.insert(url_decode(k), url_decode(v));
        }
    }

    map
}

fn url_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

/// Bare `.csv` names only; no separators, no traversal.
fn is_safe_csv_filename(name: &str) -> bool {
    !name.is_empty()
        && name.ends_with(".csv")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}
