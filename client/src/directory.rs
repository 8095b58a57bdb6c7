//! Server list and staff roster: fetch once, replace the container.

use wasm_bindgen_futures::spawn_local;

use alpha_shared::servers::render_server_list;
use alpha_shared::staff::render_staff_roster;
use alpha_shared::{ServerList, StaffRoster};

use crate::config::{SERVERS_CONTAINER_ID, SERVERS_FILE, STAFF_CONTAINER_ID, STAFF_FILE};
use crate::dom;
use crate::fetch::get_static_json;

pub(crate) fn load_servers() {
    let Some(container) = dom::by_id(SERVERS_CONTAINER_ID) else {
        dom::log_info("No #servers-container on this page; skipping server list");
        return;
    };
    spawn_local(async move {
        match get_static_json::<ServerList>(SERVERS_FILE).await {
            Ok(list) => container.set_inner_html(&render_server_list(&list)),
            Err(e) => dom::log_warn(&format!("Server list unavailable: {e}")),
        }
    });
}

pub(crate) fn load_staff() {
    let Some(container) = dom::by_id(STAFF_CONTAINER_ID) else {
        dom::log_info("No #staff-container on this page; skipping staff roster");
        return;
    };
    spawn_local(async move {
        match get_static_json::<StaffRoster>(STAFF_FILE).await {
            Ok(roster) => container.set_inner_html(&render_staff_roster(&roster)),
            Err(e) => dom::log_warn(&format!("Staff roster unavailable: {e}")),
        }
    });
}
