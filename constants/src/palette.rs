/// Resting vertex tone for the whole plane (RGB, linear [0,1])
pub const BASE_TONE: [f32; 3] = [0.8, 0.71, 0.75];

/// Tone written into the three vertices of the face under the cursor
pub const HIGHLIGHT_TONE: [f32; 3] = [1.0, 0.72, 0.78];

/// How long a highlighted face takes to ease back to the base tone
pub const FADE_DURATION_SECS: f32 = 0.5;
