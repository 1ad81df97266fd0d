mod error;

pub use error::{Error, Result};

use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, task::JoinHandle};

use ssd_domain::{Controller, Flash, Product};

/// An HTTP fixture bound to an ephemeral loopback port. The server stops when the fixture drops.
pub struct FixtureServer {
	addr: SocketAddr,
	handle: JoinHandle<()>,
}
impl FixtureServer {
	pub async fn spawn(router: Router) -> Result<Self> {
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, router).await {
				eprintln!("Fixture server stopped: {err}.");
			}
		});

		Ok(Self { addr, handle })
	}

	pub fn addr(&self) -> SocketAddr {
		self.addr
	}

	/// Base URL without a trailing slash.
	pub fn base_url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
	}
}
impl Drop for FixtureServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

pub fn sabrent_rocket_2230() -> Product {
	Product {
		id: "1162".to_string(),
		url: "https://www.techpowerup.com/ssd-specs/sabrent-rocket-2230-1-tb.d1162".to_string(),
		manufacturer: "Sabrent".to_string(),
		name: "Rocket 2230".to_string(),
		capacity: "1 TB".to_string(),
		form_factor: "M.2 2230".to_string(),
		interface: "PCIe 4.0 x4".to_string(),
		protocol: "NVMe 1.4".to_string(),
		dram: "Unknown".to_string(),
		hmb: "64 MB".to_string(),
		released: "Jan 2022".to_string(),
		endurance: "600 TBW".to_string(),
		warranty: "5 Years".to_string(),
		seq_read: "4,750 MB/s".to_string(),
		seq_write: "4,300 MB/s".to_string(),
		controller: Controller {
			manufacturer: "Phison".to_string(),
			name: "PS5021-E21T".to_string(),
			name_short: "E21T".to_string(),
			channels: "4".to_string(),
		},
		flash: Flash {
			manufacturer: "Micron".to_string(),
			name: "B47R".to_string(),
			r#type: "TLC".to_string(),
			layers: "176".to_string(),
		},
	}
}

pub fn sabrent_rocket() -> Product {
	Product {
		id: "250".to_string(),
		url: "https://www.techpowerup.com/ssd-specs/sabrent-rocket-1-tb.d250".to_string(),
		name: "Rocket".to_string(),
		form_factor: "M.2 2280".to_string(),
		dram: "1 GB".to_string(),
		hmb: "Unknown".to_string(),
		..sabrent_rocket_2230()
	}
}

pub fn corsair_mp600_mini() -> Product {
	Product {
		id: "1461".to_string(),
		url: "https://www.techpowerup.com/ssd-specs/corsair-mp600-mini-1-tb.d1461".to_string(),
		manufacturer: "Corsair".to_string(),
		name: "MP600 Mini".to_string(),
		capacity: "1 TB".to_string(),
		form_factor: "M.2 2230".to_string(),
		interface: "PCIe 4.0 x4".to_string(),
		protocol: "NVMe 2.0".to_string(),
		dram: "Unknown".to_string(),
		hmb: "64 MB".to_string(),
		controller: Controller {
			manufacturer: "Phison".to_string(),
			name: "PS5027-E27T".to_string(),
			name_short: "E27T".to_string(),
			channels: "4".to_string(),
		},
		flash: Flash {
			manufacturer: "Micron".to_string(),
			name: "B58R".to_string(),
			r#type: "TLC".to_string(),
			layers: "232".to_string(),
		},
		..Product::default()
	}
}

pub fn samsung_990_pro_heatsink() -> Product {
	Product {
		id: "1029".to_string(),
		url: "https://www.techpowerup.com/ssd-specs/samsung-990-pro-2-tb.d1029".to_string(),
		manufacturer: "Samsung".to_string(),
		name: "990 PRO (w/ Heatsink)".to_string(),
		capacity: "2 TB".to_string(),
		form_factor: "M.2 2280".to_string(),
		interface: "PCIe 4.0 x4".to_string(),
		dram: "2 GB".to_string(),
		hmb: "Unknown".to_string(),
		controller: Controller {
			manufacturer: "Samsung".to_string(),
			name: "Pascal".to_string(),
			..Controller::default()
		},
		flash: Flash {
			manufacturer: "Samsung".to_string(),
			r#type: "TLC".to_string(),
			..Flash::default()
		},
		..Product::default()
	}
}

pub fn sample_products() -> Vec<Product> {
	vec![sabrent_rocket(), sabrent_rocket_2230(), corsair_mp600_mini(), samsung_990_pro_heatsink()]
}
