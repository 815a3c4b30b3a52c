use echo_core::Variant;

// Canvases picked up automatically at start, by element id
pub const AUTO_MOUNTS: [(&str, Variant); 3] = [
    ("echo-aura", Variant::RingAura),
    ("echo-wave", Variant::BrokenWave),
    ("ambient-field", Variant::AmbientField),
];

// Static page backdrop
pub const BACKDROP_CANVAS_ID: &str = "echo-backdrop";
pub const BACKDROP_SEED: u64 = 0x9E37_79B9_7F4A_7C15; // fixed so the speckle pattern is stable across reloads
