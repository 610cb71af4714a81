use nalgebra::{Point3, Vector3};

/// 2点間のベクトル (to - from)
pub fn vector_between(from: &Point3<f32>, to: &Point3<f32>) -> Vector3<f32> {
    to - from
}

/// 2ベクトルのなす角（度, 0〜180）
///
/// acos(v1·v2 / |v1||v2|) と同値だが、平行・反平行で丸め誤差が出ないよう
/// atan2(|v1×v2|, v1·v2) で計算する。
/// どちらかの長さが0（関節位置の重なり）なら `None`。
pub fn angle_between(v1: &Vector3<f32>, v2: &Vector3<f32>) -> Option<f32> {
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 == 0.0 || n2 == 0.0 || !n1.is_finite() || !n2.is_finite() {
        return None;
    }

    let sin = v1.cross(v2).norm();
    let cos = v1.dot(v2);
    let deg = sin.atan2(cos).to_degrees();
    deg.is_finite().then_some(deg)
}

/// p2 を頂点とし、p1 と p3 へ向かう2本の線分のなす角（度）
pub fn joint_angle(p1: &Point3<f32>, p2: &Point3<f32>, p3: &Point3<f32>) -> Option<f32> {
    angle_between(&vector_between(p2, p1), &vector_between(p2, p3))
}

/// センサー原点からの距離
pub fn distance_from_origin(p: &Point3<f32>) -> f32 {
    p.coords.norm()
}

/// ミリメートル → メートル
pub fn mm_to_m(p: &Point3<f32>) -> Point3<f32> {
    Point3::from(p.coords / 1000.0)
}
