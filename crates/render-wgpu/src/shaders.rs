/// Lit meshes. Up to `MAX_LIGHTS` lights of the six kinds, evaluated per
/// fragment with a Blinn-Phong approximation of a rough standard material.
pub const MESH_SHADER: &str = r#"
const MAX_LIGHTS: u32 = 8u;

const KIND_AMBIENT: u32 = 0u;
const KIND_DIRECTIONAL: u32 = 1u;
const KIND_HEMISPHERE: u32 = 2u;
const KIND_POINT: u32 = 3u;
const KIND_RECT_AREA: u32 = 4u;
const KIND_SPOT: u32 = 5u;

struct Light {
    // xyz position, w kind
    position: vec4<f32>,
    // rgb color, w intensity
    color: vec4<f32>,
    // xyz unit direction the light travels, w cutoff distance
    direction: vec4<f32>,
    // decay, cos outer cone, cos inner cone, unused
    params: vec4<f32>,
    // rgb hemisphere ground color, w rect area (width * height)
    ground: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    light_count: vec4<u32>,
    lights: array<Light, MAX_LIGHTS>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    // rgb albedo, w roughness
    @location(6) material: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) material: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.material = instance.material;
    return out;
}

fn range_falloff(dist: f32, cutoff: f32, decay: f32) -> f32 {
    var f = 1.0 / max(pow(dist, decay), 0.01);
    if (cutoff > 0.0) {
        let r = dist / cutoff;
        let w = clamp(1.0 - r * r * r * r, 0.0, 1.0);
        f = f * w * w;
    }
    return f;
}

fn shade(n: vec3<f32>, v: vec3<f32>, l: vec3<f32>, albedo: vec3<f32>, roughness: f32) -> vec3<f32> {
    let ndl = max(dot(n, l), 0.0);
    let h = normalize(l + v);
    let shininess = max(2.0 / max(roughness * roughness, 0.001) - 2.0, 1.0);
    let spec = pow(max(dot(n, h), 0.0), shininess) * (1.0 - roughness) * 0.5;
    return (albedo + vec3<f32>(spec)) * ndl;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let v = normalize(uniforms.camera_pos.xyz - in.world_pos);
    let albedo = in.material.rgb;
    let roughness = clamp(in.material.w, 0.04, 1.0);

    var total = vec3<f32>(0.0);
    let count = min(uniforms.light_count.x, MAX_LIGHTS);
    for (var i = 0u; i < count; i = i + 1u) {
        let light = uniforms.lights[i];
        let kind = u32(light.position.w);
        let radiance = light.color.rgb * light.color.w;

        if (kind == KIND_AMBIENT) {
            total += albedo * radiance;
        } else if (kind == KIND_HEMISPHERE) {
            let up = normalize(light.position.xyz);
            let k = 0.5 * dot(n, up) + 0.5;
            total += albedo * mix(light.ground.rgb, light.color.rgb, k) * light.color.w;
        } else if (kind == KIND_DIRECTIONAL) {
            total += shade(n, v, -light.direction.xyz, albedo, roughness) * radiance;
        } else {
            let to_light = light.position.xyz - in.world_pos;
            let dist = length(to_light);
            let l = to_light / max(dist, 1e-4);
            var energy = range_falloff(dist, light.direction.w, light.params.x);
            if (kind == KIND_SPOT) {
                let c = dot(-l, light.direction.xyz);
                energy *= smoothstep(light.params.y, light.params.z, c);
            } else if (kind == KIND_RECT_AREA) {
                // one-sided emitter scaled by its area
                energy = max(dot(-l, light.direction.xyz), 0.0) * light.ground.w
                    / max(dist * dist, 0.01);
            }
            total += shade(n, v, l, albedo, roughness) * radiance * energy;
        }
    }

    return vec4<f32>(total, 1.0);
}
"#;

/// Unlit colored line lists for light helpers.
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Fullscreen triangle that scales the offscreen scene to the surface.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0)
var scene_tex: texture_2d<f32>;
@group(0) @binding(1)
var scene_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(uv * vec2<f32>(2.0, -2.0) + vec2<f32>(-1.0, 1.0), 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(scene_tex, scene_sampler, in.uv);
}
"#;
