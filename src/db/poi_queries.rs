use crate::models::{Coordinates, Poi, PoiCategory};
use sqlx::PgPool;

use super::poi_repository::RawPoiRow;

pub async fn find_pois_nearby(
    pool: &PgPool,
    center: &Coordinates,
    categories: &[PoiCategory],
    radius_meters: f64,
    limit: i64,
) -> Result<Vec<Poi>, sqlx::Error> {
    let point_wkt = format!("POINT({} {})", center.lng, center.lat);
    let category_strs = categories_to_strings(categories);

    let (category_clause, limit_param) = if category_strs.is_some() {
        ("AND categories && $3", "$4")
    } else {
        ("", "$3")
    };

    // id breaks distance ties so identical searches return identical lists
    let sql = format!(
        "SELECT id, name, categories,
                ST_Y(location::geometry) as lat, ST_X(location::geometry) as lng,
                rating, url, grid_cell_id,
                ST_Distance(location, ST_GeogFromText($1)) as distance_meters
         FROM pois
         WHERE ST_DWithin(location, ST_GeogFromText($1), $2)
         {category_clause}
         ORDER BY distance_meters, id
         LIMIT {limit_param}"
    );

    let mut query = sqlx::query_as::<_, PoiRow>(&sql)
        .bind(&point_wkt)
        .bind(radius_meters);

    if let Some(ref cats) = category_strs {
        query = query.bind(cats);
    }

    let rows = query.bind(limit).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.into_raw().into_poi())
        .collect())
}

pub async fn find_poi_by_id(pool: &PgPool, id: &str) -> Result<Option<Poi>, sqlx::Error> {
    let row = sqlx::query_as::<_, PoiRow>(
        "SELECT id, name, categories,
                ST_Y(location::geometry) as lat, ST_X(location::geometry) as lng,
                rating, url, grid_cell_id,
                NULL::double precision as distance_meters
         FROM pois
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|row| row.into_raw().into_poi()))
}

fn categories_to_strings(categories: &[PoiCategory]) -> Option<Vec<String>> {
    if categories.is_empty() {
        None
    } else {
        Some(categories.iter().map(|c| c.to_string()).collect())
    }
}

#[derive(sqlx::FromRow)]
struct PoiRow {
    id: String,
    name: String,
    categories: Vec<String>,
    lat: f64,
    lng: f64,
    rating: Option<f64>,
    url: Option<String>,
    grid_cell_id: Option<i32>,
    #[allow(dead_code)]
    distance_meters: Option<f64>,
}

impl PoiRow {
    fn into_raw(self) -> RawPoiRow {
        RawPoiRow {
            id: self.id,
            name: self.name,
            categories: self.categories,
            lat: self.lat,
            lng: self.lng,
            rating: self.rating,
            url: self.url,
            grid_cell_id: self.grid_cell_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_categories_mean_no_filter() {
        assert!(categories_to_strings(&[]).is_none());
        assert_eq!(
            categories_to_strings(&[PoiCategory::Cafe, PoiCategory::BookStore]),
            Some(vec!["cafe".to_string(), "book_store".to_string()])
        );
    }
}
