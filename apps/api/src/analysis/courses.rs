//! Course & certificate suggestions for a predicted field.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::Domain;

pub const DEFAULT_COURSE_COUNT: usize = 5;
pub const MAX_COURSE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub url: String,
}

const DATA_SCIENCE_COURSES: &[(&str, &str)] = &[
    (
        "Machine Learning Crash Course by Google [Free]",
        "https://developers.google.com/machine-learning/crash-course",
    ),
    (
        "Machine Learning Specialization by Andrew Ng",
        "https://www.coursera.org/specializations/machine-learning-introduction",
    ),
    (
        "Deep Learning Specialization by DeepLearning.AI",
        "https://www.coursera.org/specializations/deep-learning",
    ),
    (
        "Practical Deep Learning for Coders by fast.ai [Free]",
        "https://course.fast.ai/",
    ),
    ("Kaggle Learn [Free]", "https://www.kaggle.com/learn"),
    (
        "Machine Learning A-Z by Udemy",
        "https://www.udemy.com/course/machinelearning/",
    ),
];

const WEB_COURSES: &[(&str, &str)] = &[
    (
        "Full Stack Open by University of Helsinki [Free]",
        "https://fullstackopen.com/en/",
    ),
    ("The Odin Project [Free]", "https://www.theodinproject.com/"),
    (
        "MDN Learn Web Development [Free]",
        "https://developer.mozilla.org/en-US/docs/Learn",
    ),
    ("React Official Tutorial [Free]", "https://react.dev/learn"),
    ("Node.js Learn [Free]", "https://nodejs.org/en/learn"),
    (
        "freeCodeCamp Full Stack Curriculum [Free]",
        "https://www.freecodecamp.org/learn",
    ),
];

const ANDROID_COURSES: &[(&str, &str)] = &[
    (
        "Android Basics with Compose by Google [Free]",
        "https://developer.android.com/courses/android-basics-compose/course",
    ),
    (
        "Jetpack Compose Pathway by Google [Free]",
        "https://developer.android.com/courses/pathways/compose",
    ),
    ("Kotlin Koans [Free]", "https://kotlinlang.org/docs/koans.html"),
    ("Flutter Codelabs [Free]", "https://docs.flutter.dev/codelabs"),
];

const IOS_COURSES: &[(&str, &str)] = &[
    (
        "SwiftUI Tutorials by Apple [Free]",
        "https://developer.apple.com/tutorials/swiftui",
    ),
    (
        "CS193p Developing Apps for iOS by Stanford [Free]",
        "https://cs193p.sites.stanford.edu/",
    ),
    (
        "100 Days of SwiftUI by Hacking with Swift [Free]",
        "https://www.hackingwithswift.com/100/swiftui",
    ),
    (
        "The Swift Programming Language [Free]",
        "https://docs.swift.org/swift-book/",
    ),
];

const UIUX_COURSES: &[(&str, &str)] = &[
    (
        "Google UX Design Professional Certificate",
        "https://www.coursera.org/professional-certificates/google-ux-design",
    ),
    (
        "Interaction Design Foundation Courses",
        "https://www.interaction-design.org/courses",
    ),
    ("Material Design 3 Guidelines [Free]", "https://m3.material.io/"),
    (
        "Apple Human Interface Guidelines [Free]",
        "https://developer.apple.com/design/human-interface-guidelines/",
    ),
];

/// Full catalog for a field; empty for `Undetermined`.
pub fn course_catalog(domain: Domain) -> Vec<Course> {
    let entries: &[(&str, &str)] = match domain {
        Domain::DataScience => DATA_SCIENCE_COURSES,
        Domain::WebDevelopment => WEB_COURSES,
        Domain::AndroidDevelopment => ANDROID_COURSES,
        Domain::IosDevelopment => IOS_COURSES,
        Domain::UiUxDevelopment => UIUX_COURSES,
        Domain::Undetermined => &[],
    };
    entries
        .iter()
        .map(|(name, url)| Course {
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

/// Shuffled pick of `count` courses (clamped to 1..=10) for a field.
pub fn recommend_courses(domain: Domain, count: usize, rng: &mut fastrand::Rng) -> Vec<Course> {
    let mut catalog = course_catalog(domain);
    rng.shuffle(&mut catalog);
    catalog.truncate(count.clamp(1, MAX_COURSE_COUNT));
    catalog
}
